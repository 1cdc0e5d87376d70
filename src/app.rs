//! Desktop window state and Iced application implementation
//!
//! Drives the submitter and prober through Iced tasks: each submit becomes a
//! `Task::perform` whose completion message is fed back to the submitter.

use iced::keyboard::Key;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{keyboard, Background, Border, Color, Element, Event, Length, Padding, Subscription, Task, Theme};

use crate::backend::api::BackendClient;
use crate::backend::types::RecommendationItem;
use crate::probe::{AvailabilityState, Prober};
use crate::query::Query;
use crate::submitter::{Completion, RequestState, SubmitError, Submitter};
use crate::ui::search_bar;
use crate::ui::theme::DarkTheme;

// ============================================================================
// Application State
// ============================================================================

pub struct Recommender {
    query: String,
    url: String,
    submitter: Submitter,
    availability: AvailabilityState,
    /// Index into the current result set whose details are expanded
    selected: Option<usize>,
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    UrlChanged(String),
    Submit,
    SubmitFinished(Completion),
    ProbeFinished(AvailabilityState),
    Select(usize),
    CloseDetail,
    DismissNotice,
    IcedEvent(Event),
}

impl Recommender {
    /// Build the window state and kick off the startup health probe
    pub fn new(backend: BackendClient, prober: Prober) -> (Self, Task<Message>) {
        let state = Self {
            query: String::new(),
            url: String::new(),
            submitter: Submitter::new(backend),
            availability: AvailabilityState::Unknown,
            selected: None,
        };
        let probe = Task::perform(async move { prober.probe().await }, Message::ProbeFinished);
        (state, probe)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.query = value;
                Task::none()
            }

            Message::UrlChanged(value) => {
                self.url = value;
                Task::none()
            }

            Message::Submit => {
                let query = Query::new(self.query.clone(), self.url.clone());
                self.selected = None;
                match self.submitter.begin(&query) {
                    Ok(dispatch) => Task::perform(dispatch.send(), Message::SubmitFinished),
                    Err(SubmitError::Busy) | Err(SubmitError::InvalidInput) => Task::none(),
                }
            }

            Message::SubmitFinished(completion) => {
                self.submitter.complete(completion);
                Task::none()
            }

            Message::ProbeFinished(availability) => {
                self.availability = availability;
                Task::none()
            }

            Message::Select(index) => {
                self.selected = if self.selected == Some(index) { None } else { Some(index) };
                Task::none()
            }

            Message::CloseDetail => {
                self.selected = None;
                Task::none()
            }

            Message::DismissNotice => {
                self.submitter.dismiss();
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(keyboard::key::Named::Escape),
                    ..
                }) = event
                {
                    return if self.selected.is_some() {
                        self.update(Message::CloseDetail)
                    } else {
                        self.update(Message::DismissNotice)
                    };
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let in_flight = self.submitter.is_in_flight();
        let can_submit = !in_flight && !Query::new(self.query.as_str(), self.url.as_str()).is_blank();

        let header = row![
            text("Assessment Recommender").size(26).color(DarkTheme::TEXT),
            Space::with_width(Length::Fill),
            self.view_availability(),
        ]
        .align_y(iced::Alignment::Center);

        let submit = button(
            text(if in_flight { "Getting Recommendations..." } else { "Get Recommendations" })
                .size(16)
                .width(Length::Fill)
                .align_x(iced::alignment::Horizontal::Center),
        )
        .padding(12)
        .width(Length::Fill)
        .on_press_maybe(can_submit.then_some(Message::Submit));

        let form = column![
            search_bar::view("Enter your query", &self.query, Message::QueryChanged, Message::Submit),
            container(text("- OR -").size(13).color(DarkTheme::TEXT_MUTED)).center_x(Length::Fill),
            search_bar::view("Enter a job description URL", &self.url, Message::UrlChanged, Message::Submit),
            submit,
        ]
        .spacing(12);

        let content = column![header, Space::with_height(16), form, Space::with_height(16), self.view_state()]
            .spacing(0);

        container(container(content).padding(20).width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }

    fn view_availability(&self) -> Element<'_, Message> {
        let (label, color) = match self.availability {
            AvailabilityState::Unknown => ("● Checking backend", DarkTheme::TEXT_MUTED),
            AvailabilityState::Available => ("● Backend online", DarkTheme::SUCCESS),
            AvailabilityState::Unavailable => ("● Backend offline", DarkTheme::DANGER),
        };
        text(label).size(13).color(color).into()
    }

    fn view_state(&self) -> Element<'_, Message> {
        match self.submitter.state() {
            RequestState::Idle => text("Describe a role or paste a job posting link.")
                .size(14)
                .color(DarkTheme::TEXT_MUTED)
                .into(),
            RequestState::InFlight => text("Finding matching assessments...")
                .size(14)
                .color(DarkTheme::TEXT_MUTED)
                .into(),
            RequestState::Failed(err) => {
                let notice = row![
                    text(err.message()).size(14).color(DarkTheme::DANGER).width(Length::Fill),
                    button(text("Dismiss").size(13)).on_press(Message::DismissNotice),
                ]
                .spacing(12)
                .align_y(iced::Alignment::Center);

                container(notice)
                    .padding(Padding::from([10.0, 14.0]))
                    .width(Length::Fill)
                    .style(|_theme| container::Style {
                        background: Some(Background::Color(DarkTheme::DANGER_SURFACE)),
                        border: Border::default().rounded(8),
                        ..Default::default()
                    })
                    .into()
            }
            RequestState::Succeeded { items, message } => self.view_results(items, message.as_deref()),
        }
    }

    fn view_results<'a>(&'a self, items: &'a [RecommendationItem], message: Option<&'a str>) -> Element<'a, Message> {
        let mut list = column![].spacing(6);

        if let Some(message) = message {
            list = list.push(text(message).size(13).color(DarkTheme::PRIMARY));
        }
        if items.is_empty() {
            list = list.push(
                text("No matching assessments found.")
                    .size(14)
                    .color(DarkTheme::TEXT_MUTED),
            );
        }

        for (i, item) in items.iter().enumerate() {
            let is_selected = self.selected == Some(i);
            list = list.push(view_item(i, item, is_selected));
            if is_selected {
                list = list.push(view_detail(item));
            }
        }

        scrollable(list).height(Length::Fill).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Chip labels for the remote-testing and adaptive flags
pub fn feature_labels(item: &RecommendationItem) -> (&'static str, &'static str) {
    (
        if item.remote_testing { "Remote Testing Available" } else { "In-Person Only" },
        if item.adaptive_irt { "Adaptive Testing" } else { "Fixed Format" },
    )
}

fn view_item(index: usize, item: &RecommendationItem, is_selected: bool) -> Element<'_, Message> {
    let (remote, adaptive) = feature_labels(item);

    let body = column![
        text(&item.name).size(16).color(DarkTheme::TEXT),
        text(&item.description).size(13).color(DarkTheme::TEXT_MUTED),
        text(format!("{remote}  ·  {adaptive}")).size(12).color(DarkTheme::PRIMARY),
    ]
    .spacing(4);

    button(body)
        .width(Length::Fill)
        .padding(Padding::from([10.0, 12.0]))
        .on_press(Message::Select(index))
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(if is_selected {
                DarkTheme::SELECTION
            } else {
                DarkTheme::SURFACE
            })),
            text_color: DarkTheme::TEXT,
            border: Border::default().rounded(8),
            ..Default::default()
        })
        .into()
}

fn view_detail(item: &RecommendationItem) -> Element<'_, Message> {
    let keywords = if item.keywords.is_empty() {
        "none listed".to_string()
    } else {
        item.keywords.join(", ")
    };

    let detail = column![
        text("Keywords").size(12).color(DarkTheme::PRIMARY),
        text(keywords).size(13).color(DarkTheme::TEXT),
        text("Catalog").size(12).color(DarkTheme::PRIMARY),
        text(&item.url).size(13).color(DarkTheme::TEXT_MUTED),
        button(text("Close").size(13)).on_press(Message::CloseDetail),
    ]
    .spacing(4);

    container(detail)
        .padding(Padding::from([8.0, 16.0]))
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color::from_rgb(0.14, 0.14, 0.17))),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}
