mod quiz_vm;
mod screen_vm;
mod time_fmt;

pub use quiz_vm::{KeyPress, QuizIntent, QuizVm};
pub use screen_vm::{
    CategoriesVm, CategoryItemVm, LoadFailureVm, NoticeVm, OptionState, OptionVm, QuestionVm,
    ResultsVm, ReviewItemVm, ReviewVm, ScreenVm, map_screen,
};
pub use time_fmt::format_countdown;
