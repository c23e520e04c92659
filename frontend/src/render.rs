use sauron::{
    html::{attributes, attributes::*, *},
    prelude::*,
};
use shared::{Task, TaskId};

use crate::controller::{Msg, StatusKind, StatusMessage, TaskController};
use crate::i18n::Messages;

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub time: String,
    pub location: String,
    pub content: String,
    pub weather: Option<String>,
}

impl From<&Task> for TaskCard {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            time: task.time.clone(),
            location: task.location.clone(),
            content: task.task_content.clone(),
            weather: task.weather().map(str::to_string),
        }
    }
}

/// What the task list shows, computed from scratch on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListView {
    Empty,
    Cards(Vec<TaskCard>),
}

impl TaskListView {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            TaskListView::Empty
        } else {
            TaskListView::Cards(tasks.iter().map(TaskCard::from).collect())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TaskListView::Empty)
    }

    pub fn cards(&self) -> &[TaskCard] {
        match self {
            TaskListView::Empty => &[],
            TaskListView::Cards(cards) => cards,
        }
    }
}

fn display(visible: bool) -> Attribute<Msg> {
    attributes::styles([("display", if visible { "block" } else { "none" }.to_string())])
}

pub fn view_page(controller: &TaskController) -> Node<Msg> {
    let messages = controller.messages();
    div(
        [class("min-h-screen bg-ctp-base text-ctp-text")],
        [
            header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
                div([class("max-w-3xl mx-auto px-6 py-4")], [
                    h1([class("text-2xl font-bold text-ctp-text")], [text(messages.title)]),
                ]),
            ]),
            div(
                [class("max-w-3xl mx-auto px-6 py-8 space-y-6")],
                [
                    view_input_panel(controller),
                    view_loading(controller.is_loading(), messages),
                    view_status(controller.status(), messages),
                    view_task_list(&controller.list_view(), messages, controller.is_loading()),
                ],
            ),
        ],
    )
}

fn view_input_panel(controller: &TaskController) -> Node<Msg> {
    let messages = controller.messages();
    div([class("p-6 bg-ctp-surface0 rounded-lg border border-ctp-surface1 space-y-4")], [
        textarea([
            placeholder(messages.input_placeholder),
            value(controller.input().to_string()),
            on_input(|event| Msg::SetInput(event.value())),
            on_keydown(|event| Msg::KeyDown {
                key: event.key(),
                ctrl: event.ctrl_key(),
            }),
            class("w-full px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent h-24 resize-y"),
        ], []),
        div([class("flex items-center justify-between")], [
            span([class("text-sm text-ctp-subtext0")], [text(messages.submit_hint)]),
            button([
                on_click(|_| Msg::Submit),
                r#type("button"),
                disabled(controller.is_loading()),
                class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200 disabled:opacity-50"),
            ], [text(messages.submit_label)]),
        ]),
    ])
}

fn view_loading(loading: bool, messages: &Messages) -> Node<Msg> {
    div([class("loading text-center py-4 text-ctp-subtext0 italic"), display(loading)], [
        span([class("animate-spin inline-block mr-2 text-ctp-blue")], [text("◐")]),
        text(messages.loading),
    ])
}

fn view_status(status: Option<&StatusMessage>, messages: &Messages) -> Node<Msg> {
    let Some(status) = status else {
        return div([class("result-message"), display(false)], []);
    };
    let tone = match status.kind {
        StatusKind::Success => "success-message bg-ctp-green/20 text-ctp-green border-ctp-green",
        StatusKind::Error => "error-message bg-ctp-red/20 text-ctp-red border-ctp-red",
    };
    div([
        class(&format!("result-message flex items-center justify-between px-4 py-3 rounded-lg border {}", tone)),
        display(true),
    ], [
        span([], [text(&status.text)]),
        button([
            on_click(|_| Msg::DismissStatus),
            r#type("button"),
            class("ml-4 text-sm opacity-70 hover:opacity-100"),
        ], [text(messages.dismiss_label)]),
    ])
}

/// Placeholder plus card list. The list is rebuilt in full each time.
pub fn view_task_list(view: &TaskListView, messages: &Messages, busy: bool) -> Node<Msg> {
    div([class("space-y-4")], [
        div([class("empty-state text-center py-12"), display(view.is_empty())], [
            div([class("text-ctp-overlay0 text-6xl mb-4")], [text("📝")]),
            p([class("text-ctp-subtext0")], [text(messages.empty_state)]),
        ]),
        div(
            [class("tasks-list space-y-4")],
            view.cards().iter().map(|card| view_card(card, messages, busy)).collect::<Vec<_>>(),
        ),
    ])
}

fn view_card(card: &TaskCard, messages: &Messages, busy: bool) -> Node<Msg> {
    let task_id = card.id;
    div([
        key(card.id.to_string()),
        class("task-card border rounded-xl p-6 bg-ctp-surface0 border-ctp-surface1 shadow-sm hover:shadow-lg transition-all duration-300"),
    ], [
        div([class("task-header flex items-center justify-between mb-2 text-sm text-ctp-subtext1")], [
            div([class("task-time font-medium")], [text(&card.time)]),
            div([class("task-location")], [text(&card.location)]),
        ]),
        div([class("task-content text-lg text-ctp-text break-words")], [text(&card.content)]),
        match &card.weather {
            Some(weather) => div([class("task-weather mt-2 text-sm text-ctp-sky")], [text(weather)]),
            None => span([], []),
        },
        div([class("mt-4 flex justify-end")], [
            button([
                on_click(move |_| Msg::RequestDelete(task_id)),
                attr("data-id", card.id.to_string()),
                r#type("button"),
                disabled(busy),
                class("delete-btn bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-full text-sm font-medium transition-colors duration-200"),
            ], [text(messages.delete_label)]),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, content: &str, weather: Option<&str>) -> Task {
        Task {
            id: TaskId(id),
            time: "2025-06-01 15:00".into(),
            location: "西湖".into(),
            task_content: content.into(),
            weather_info: weather.map(str::to_string),
        }
    }

    fn render(tasks: &[Task]) -> String {
        view_task_list(&TaskListView::from_tasks(tasks), Messages::en(), false).render_to_string()
    }

    /// The opening tag of the first element whose markup mentions `class`.
    fn opening_tag<'a>(html: &'a str, class: &str) -> &'a str {
        let at = html.find(class).unwrap_or_else(|| panic!("no {} in {}", class, html));
        let start = html[..at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        &html[start..=end]
    }

    fn display_of(tag: &str) -> String {
        let compact: String = tag.chars().filter(|c| !c.is_whitespace()).collect();
        let at = compact.find("display:").expect("no display style");
        compact[at..].chars().take_while(|c| c.is_ascii_alphabetic() || *c == ':').collect()
    }

    /// Markup between the opening tag of `class` and whatever follows it.
    fn after_tag<'a>(html: &'a str, class: &str) -> &'a str {
        let tag = opening_tag(html, class);
        let start = html.find(tag).unwrap() + tag.len();
        html[start..].trim_start()
    }

    #[test]
    fn rendered_empty_list_shows_placeholder_and_no_cards() {
        let html = render(&[]);

        assert_eq!(display_of(opening_tag(&html, "empty-state")), "display:block");
        assert!(after_tag(&html, "tasks-list").starts_with("</div>"));
        assert!(!html.contains("task-card"));
    }

    #[test]
    fn rendered_cards_hide_placeholder() {
        let html = render(&[task(1, "read", None), task(2, "cook", None)]);

        assert_eq!(display_of(opening_tag(&html, "empty-state")), "display:none");
        assert_eq!(html.matches("task-card").count(), 2);
        assert!(html.contains("read"));
        assert!(html.contains("cook"));
    }

    #[test]
    fn rendered_weather_row_follows_the_value() {
        let without = render(&[task(1, "buy milk", None)]);
        assert!(!without.contains("task-weather"));

        let empty = render(&[task(1, "buy milk", Some(""))]);
        assert!(!empty.contains("task-weather"));

        let with = render(&[task(1, "hike", Some("晴，18°C~25°C"))]);
        assert!(with.contains("task-weather"));
        assert!(with.contains("晴，18°C~25°C"));
    }

    #[test]
    fn rendered_delete_controls_carry_the_task_id() {
        let html = render(&[task(7, "run", None), task(12, "swim", None)]);

        assert!(opening_tag(&html, "data-id=\"7\"").contains("delete-btn"));
        assert!(opening_tag(&html, "data-id=\"12\"").contains("delete-btn"));
    }

    #[test]
    fn empty_collection_shows_placeholder() {
        let view = TaskListView::from_tasks(&[]);
        assert!(view.is_empty());
        assert!(view.cards().is_empty());
    }

    #[test]
    fn absent_collection_renders_like_an_empty_one() {
        let response: shared::TaskListResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(TaskListView::from_tasks(&response.tasks), TaskListView::Empty);
    }

    #[test]
    fn one_card_per_task_in_server_order() {
        let tasks = vec![task(3, "run", None), task(1, "read", None), task(2, "cook", None)];
        let view = TaskListView::from_tasks(&tasks);

        assert!(!view.is_empty());
        let ids: Vec<_> = view.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![TaskId(3), TaskId(1), TaskId(2)]);
        assert_eq!(view.cards()[0].time, "2025-06-01 15:00");
        assert_eq!(view.cards()[0].location, "西湖");
        assert_eq!(view.cards()[0].content, "run");
    }

    #[test]
    fn weather_row_only_for_non_empty_values() {
        let tasks = vec![
            task(1, "absent", None),
            task(2, "empty", Some("")),
            task(3, "present", Some("多云，20°C~26°C")),
        ];
        let view = TaskListView::from_tasks(&tasks);
        let weather: Vec<_> = view.cards().iter().map(|c| c.weather.as_deref()).collect();
        assert_eq!(weather, vec![None, None, Some("多云，20°C~26°C")]);
    }

    #[test]
    fn null_weather_from_the_wire_has_no_row() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"time":"","location":"","task_content":"buy milk","weather_info":null}"#,
        )
        .unwrap();
        assert_eq!(TaskCard::from(&task).weather, None);
    }
}
