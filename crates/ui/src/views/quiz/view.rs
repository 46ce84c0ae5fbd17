use std::time::Duration;

use dioxus::document::eval;
use dioxus::core::Task;
use dioxus::prelude::*;
use services::TickOutcome;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::vm::{KeyPress, QuizIntent, QuizVm, ScreenVm};

use super::screens::{CategoryPicker, NoticeScreen, QuestionScreen, ResultsScreen, ReviewScreen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.quiz_settings();
    let clock = ctx.clock();
    let mut vm = use_signal(move || QuizVm::new(settings, clock));
    let timer_task = use_signal(|| None::<Task>);
    let mut did_focus = use_signal(|| false);

    let question_banks = ctx.question_banks();
    let _load = use_resource(move || {
        let question_banks = question_banks.clone();
        let mut vm = vm;
        async move {
            let result = question_banks.load_all().await;
            if let Err(err) = &result {
                warn!(error = %err, "question banks unavailable");
            }
            vm.write().load_finished(result);
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut rng = rand::rng();
        vm.write().dispatch(intent, &mut rng);
    });

    // Runs after every controller change. Scope teardown drops the task too.
    use_effect(move || {
        let active = vm.read().timer_active();
        sync_timer(active, timer_task, vm);
    });

    use_effect(move || {
        if did_focus() {
            return;
        }
        did_focus.set(true);
        let _ = eval("document.getElementById(\"quiz-root\")?.focus();");
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let key = match evt.data.key() {
            Key::Enter => KeyPress::Enter,
            Key::Escape => KeyPress::Escape,
            Key::Character(value) => KeyPress::Char(value),
            _ => return,
        };
        let intent = vm.read().key_intent(&key);
        if let Some(intent) = intent {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    let screen = vm.read().screen();
    let last_error = vm.read().last_error();

    rsx! {
        div { class: "quiz-root", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            header { class: "app-header",
                h1 { class: "app-header__title", "Security Guard Practice Quiz" }
            }
            if let Some(err) = last_error {
                p { class: "view-error", role: "alert", "{err.message()}" }
            }
            main { class: "quiz-main",
                match screen {
                    ScreenVm::Categories(picker) => rsx! {
                        CategoryPicker { vm: picker, on_intent: dispatch }
                    },
                    ScreenVm::Question(question) => rsx! {
                        QuestionScreen { vm: question, on_intent: dispatch }
                    },
                    ScreenVm::Results(results) => rsx! {
                        ResultsScreen { vm: results, on_intent: dispatch }
                    },
                    ScreenVm::Review(review) => rsx! {
                        ReviewScreen { vm: review, on_intent: dispatch }
                    },
                    ScreenVm::Notice(notice) => rsx! {
                        NoticeScreen { vm: notice, on_intent: dispatch }
                    },
                }
            }
        }
    }
}

fn sync_timer(active: bool, mut timer_task: Signal<Option<Task>>, vm: Signal<QuizVm>) {
    let running = *timer_task.peek();
    match (active, running) {
        (true, None) => {
            timer_task.set(Some(spawn(run_timer(vm))));
        }
        (false, Some(task)) => {
            task.cancel();
            timer_task.set(None);
        }
        (true, Some(_)) | (false, None) => {}
    }
}

async fn run_timer(mut vm: Signal<QuizVm>) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    // The first tick completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if vm.write().tick() == TickOutcome::Expired {
            info!("mock exam time expired");
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<QuizVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
