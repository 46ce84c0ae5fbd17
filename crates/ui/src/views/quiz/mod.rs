mod screens;
mod view;

pub use view::QuizView;

#[cfg(test)]
pub(crate) use view::QuizTestHandles;
