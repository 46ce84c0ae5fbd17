use dioxus::prelude::*;

use crate::vm::{
    CategoriesVm, CategoryItemVm, NoticeVm, OptionVm, QuestionVm, QuizIntent, ResultsVm,
    ReviewItemVm, ReviewVm,
};

#[component]
pub fn CategoryPicker(vm: CategoriesVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let enabled = vm.controls_enabled;

    rsx! {
        section { class: "card category-selection", id: "category-selection",
            h2 { class: "category-selection__title", "Choose a category" }
            if vm.loading {
                p { class: "category-selection__status", "Loading questions..." }
            }
            div { class: "categories",
                for item in vm.categories.iter() {
                    CategoryButton {
                        key: "{item.category.id()}",
                        item: item.clone(),
                        enabled,
                        on_intent,
                    }
                }
            }
            button {
                class: "btn btn--primary",
                id: "start-mock-exam",
                r#type: "button",
                disabled: !enabled,
                onclick: move |_| on_intent.call(QuizIntent::StartMock),
                "Start Mock Exam"
            }
            if let Some(failure) = vm.load_failure.as_ref() {
                div { class: "notice notice--error", role: "alert",
                    b { "{failure.title}" }
                    div { "{failure.guidance}" }
                    pre { class: "notice__detail", "{failure.detail}" }
                }
            }
        }
    }
}

#[component]
fn CategoryButton(
    item: CategoryItemVm,
    enabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let category = item.category;
    let count = item.count_label();

    rsx! {
        button {
            class: "btn category-btn",
            r#type: "button",
            "data-category": "{category.id()}",
            disabled: !enabled,
            onclick: move |_| on_intent.call(QuizIntent::StartCategory(category)),
            span { class: "category-btn__label", "{item.label}" }
            if let Some(count) = count {
                span { class: "category-btn__count", "{count}" }
            }
        }
    }
}

#[component]
pub fn QuestionScreen(vm: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let counter = vm.counter_label();
    let number = vm.number_label();
    let bar_style = format!("width: {:.1}%", vm.progress_percent);

    rsx! {
        section { class: "quiz", id: "quiz",
            div {
                class: "quiz-progress",
                role: "progressbar",
                aria_valuenow: "{vm.position}",
                aria_valuemin: "1",
                aria_valuemax: "{vm.total}",
                div { class: "quiz-progress__bar", style: "{bar_style}" }
                div { class: "quiz-progress__meta",
                    span { class: "quiz-progress__counter", "{counter}" }
                    if let Some(countdown) = vm.countdown.as_ref() {
                        span { class: "timer-badge", id: "timer", "{countdown}" }
                    }
                }
            }
            div { class: "quiz-card card",
                p { class: "quiz-card__kind", "{vm.title}" }
                p { class: "question-number", "{number}" }
                h2 { class: "question", "{vm.prompt}" }
                div { class: "options", role: "group", aria_label: "Answer options",
                    for option in vm.options.iter() {
                        OptionButton {
                            key: "{option.key}",
                            option: option.clone(),
                            on_intent,
                        }
                    }
                }
                button {
                    class: "btn btn--primary btn--next",
                    id: "next-btn",
                    r#type: "button",
                    disabled: !vm.can_advance,
                    onclick: move |_| on_intent.call(QuizIntent::Advance),
                    "Next Question"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let key = option.key.clone();

    rsx! {
        button {
            class: "{option.state.class()}",
            r#type: "button",
            "data-opt": "{option.key}",
            disabled: option.state.is_disabled(),
            onclick: move |_| on_intent.call(QuizIntent::Pick(key.clone())),
            "{option.label}"
        }
    }
}

#[component]
pub fn ResultsScreen(vm: ResultsVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let (card_class, ring_class) = if vm.passed {
        ("results-card card results-card--pass", "score-ring score-ring--pass")
    } else {
        ("results-card card results-card--fail", "score-ring score-ring--fail")
    };
    // Circumference of the r=54 ring.
    let ring_style = format!(
        "stroke-dasharray: {:.0} 339",
        f64::from(vm.percent) / 100.0 * 339.0
    );

    rsx! {
        section { class: "{card_class}", id: "results",
            div { class: "results-score",
                p { class: "results-kind", "{vm.title}" }
                div { class: "{ring_class}", aria_hidden: "true",
                    svg { view_box: "0 0 120 120",
                        circle { class: "score-ring__bg", cx: "60", cy: "60", r: "54" }
                        circle {
                            class: "score-ring__fill",
                            cx: "60",
                            cy: "60",
                            r: "54",
                            style: "{ring_style}",
                        }
                    }
                    span { class: "score-ring__value", "{vm.percent_label()}" }
                }
                h2 { class: "results-title", "{vm.verdict()}" }
                p { class: "results-detail", "{vm.detail()}" }
                for note in vm.notes.iter() {
                    p { key: "{note}", class: "results-note", "{note}" }
                }
            }
            div { class: "results-actions",
                button {
                    class: "btn btn--primary",
                    id: "review-answers",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Review),
                    "Review Answers"
                }
                button {
                    class: "btn btn--secondary",
                    id: "retake-exam",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Retake),
                    "Retake Exam"
                }
                BackButton { on_intent }
            }
        }
    }
}

#[component]
pub fn ReviewScreen(vm: ReviewVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "review-card card", id: "review",
            h2 { class: "review-title", "Review Answers" }
            ul { class: "review-list",
                for item in vm.items.iter() {
                    ReviewItem { key: "{item.number_label}", item: item.clone() }
                }
            }
            BackButton { on_intent }
        }
    }
}

#[component]
fn ReviewItem(item: ReviewItemVm) -> Element {
    rsx! {
        li { class: "{item.class()}",
            div { class: "review-item__header",
                span { class: "review-item__num", "{item.number_label}" }
                span { class: "review-item__badge", "{item.badge()}" }
            }
            p { class: "review-item__q", "{item.prompt}" }
            p { class: "review-item__ans",
                strong { "Your answer:" }
                " {item.your_answer}"
            }
            if let Some(correct) = item.correct_answer.as_ref() {
                p { class: "review-item__correct",
                    strong { "Correct:" }
                    " {correct}"
                }
            }
            if !item.explanation.is_empty() {
                p { class: "review-item__explain", "{item.explanation}" }
            }
        }
    }
}

#[component]
pub fn NoticeScreen(vm: NoticeVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "card notice", id: "notice",
            h2 { class: "notice-title", "{vm.title}" }
            p { class: "notice-message", "{vm.message}" }
            BackButton { on_intent }
        }
    }
}

#[component]
fn BackButton(on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        button {
            class: "btn btn--ghost",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::BackToCategories),
            "Back to Categories"
        }
    }
}
