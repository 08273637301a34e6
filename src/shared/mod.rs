pub mod constants;
pub mod datetime;
pub mod params;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
