pub mod auth;
pub mod remote;
#[cfg(test)]
pub mod test_helpers;
pub mod usecase;
