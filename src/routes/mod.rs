pub mod callback_route;
pub mod default_route;
pub mod summary_route;
