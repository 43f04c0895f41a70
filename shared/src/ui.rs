use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Outline,
    Destructive,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Default => "btn-default",
            ButtonVariant::Outline => "btn-outline",
            ButtonVariant::Destructive => "btn-destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ButtonSize {
    #[default]
    Default,
    Sm,
    Lg,
    Icon,
}

impl ButtonSize {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonSize::Default => "btn-size-default",
            ButtonSize::Sm => "btn-size-sm",
            ButtonSize::Lg => "btn-size-lg",
            ButtonSize::Icon => "btn-size-icon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AlertVariant {
    #[default]
    Default,
    Destructive,
}

impl AlertVariant {
    pub fn class(&self) -> &'static str {
        match self {
            AlertVariant::Default => "alert-default",
            AlertVariant::Destructive => "alert-destructive",
        }
    }
}

/// Clamps a progress value to the 0..=100 range; non-finite values render empty.
pub fn clamp_percent(value: f64) -> f64 {
    if !value.is_finite() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
