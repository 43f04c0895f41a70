mod alert;
mod button;
mod card;
mod progress;

pub use alert::{Alert, AlertDescription};
pub use button::Button;
pub use card::{Card, CardContent, CardHeader, CardTitle};
pub use progress::Progress;
