mod quiz;
mod state;

pub use quiz::QuizView;
pub use state::ViewError;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
