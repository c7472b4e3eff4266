pub mod utils;

#[cfg(test)]
pub mod test_utils;
