pub mod shift;
pub mod rules;
pub mod fix;
pub mod render;

pub use rules::rule_pass;
pub use fix::fix_pass;
pub use render::*;
