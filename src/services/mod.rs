pub mod health_service;
pub mod inquiry_service;
pub mod submission_throttle;
