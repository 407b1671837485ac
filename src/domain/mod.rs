pub mod inquiry;
pub mod validation;
