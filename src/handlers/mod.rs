// Route handlers, grouped by resource.

pub mod batches;
pub mod bookings;
pub mod help;
