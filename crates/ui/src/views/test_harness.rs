use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::Clock;
use quiz_core::model::QuizSettings;
use quiz_core::time::fixed_clock;
use services::QuestionBankService;
use storage::repository::{InMemorySource, QuestionSource};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;
use crate::vm::{QuizIntent, QuizVm};

#[derive(Clone)]
struct TestApp {
    question_banks: Arc<QuestionBankService>,
    settings: QuizSettings,
    clock: Clock,
}

impl UiApp for TestApp {
    fn question_banks(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_banks)
    }

    fn quiz_settings(&self) -> QuizSettings {
        self.settings
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn QuizHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let the startup load settle.
    pub async fn start(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Mutate the view model directly, e.g. to move the clock and tick.
    pub fn with_vm<O>(&mut self, f: impl FnOnce(&mut QuizVm) -> O) -> O {
        let mut vm = self.handles.vm();
        let out = self.dom.in_runtime(|| f(&mut vm.write()));
        drive_dom(&mut self.dom);
        out
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(source: InMemorySource) -> ViewHarness {
    setup_view_harness_with(Arc::new(source), QuizSettings::default())
}

pub fn setup_view_harness_with(
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        question_banks: Arc::new(QuestionBankService::new(source)),
        settings,
        clock: fixed_clock(),
    });
    let handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        QuizHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}
