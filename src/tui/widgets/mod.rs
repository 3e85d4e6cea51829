pub mod practice;
pub mod review;
pub mod subjects;
