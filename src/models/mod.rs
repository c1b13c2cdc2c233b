pub mod place;
pub mod review;
