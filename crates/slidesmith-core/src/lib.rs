mod content;
mod fallback;
mod layout;
mod stock;
mod validation;

pub use content::*;
pub use fallback::*;
pub use layout::*;
pub use stock::*;
pub use validation::*;
