pub mod demo;
pub mod dispatch;
pub mod instance;
pub mod rail;
pub mod sim;
pub mod viz;

#[cfg(test)]
mod test;
