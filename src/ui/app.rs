use iced::{
    widget::{column, container, row, text, Row},
    Alignment, Application, Command, Element, Length, Theme,
};
use once_cell::sync::Lazy;

use std::sync::Arc;

pub static APP_NAME: Lazy<Arc<str>> = Lazy::new(|| "Synthesmaller Controller".into());

use crate::{
    synth::{self, dump, Group},
    ui,
};

#[derive(Debug, Clone)]
pub enum Message {
    Control(ui::section::Change),
    Device(Result<Vec<u8>, synth::Error>),
}

impl From<ui::section::Change> for Message {
    fn from(change: ui::section::Change) -> Self {
        Message::Control(change)
    }
}

#[derive(Debug, Copy, Clone, Hash)]
pub enum Subscription {
    Device(usize),
}

pub struct Flags {
    pub port_name: Arc<str>,
    pub synth: synth::Synth,
}

pub struct App {
    synth: ui::synth::Synth,
    output_text: String,
}

impl App {
    fn handle_error(&mut self, err: &dyn std::error::Error) {
        log::error!("{err}");
        self.output_text = err.to_string();
    }

    fn handle_device(&mut self, bytes: &[u8]) {
        for event in self.synth.frame_received(bytes) {
            use synth::Event::*;
            match event {
                DumpCompleted { count } => {
                    self.output_text = format!("Received {count} parameter values");
                }
                Log(line) => self.output_text = line.to_string(),
                Updated(_) | DumpStarted => (),
            }
        }
    }
}

impl Application for App {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Flags) -> (App, Command<Message>) {
        let mut app = App {
            synth: ui::synth::Synth::new(flags.synth),
            output_text: " ".to_string(),
        };

        match app.synth.connect(flags.port_name) {
            Ok(()) => {
                // Don't trust the default values, get the actual ones
                if let Err(err) = app.synth.request_dump() {
                    app.handle_error(&err);
                }
            }
            Err(err) => {
                app.handle_error(&err);
            }
        }

        (app, Command::none())
    }

    fn title(&self) -> String {
        APP_NAME.to_string()
    }

    fn update(&mut self, event: Message) -> Command<Message> {
        use Message::*;
        match event {
            Control(ui::section::Change { id, value }) => {
                if let Err(err) = self.synth.control_changed(id, value) {
                    self.handle_error(&err);
                }
            }
            Device(Ok(bytes)) => self.handle_device(&bytes),
            Device(Err(err)) => {
                if err.is_broken_connection() {
                    self.synth.disconnect();
                }

                self.handle_error(&err);
            }
        }

        Command::none()
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        self.synth.subscription().map(Message::Device)
    }

    fn view(&self) -> Element<Message> {
        let synth = self.synth.inner();

        let sections = Group::ALL
            .into_iter()
            .fold(Row::new().spacing(10), |row, group| {
                row.push(ui::section::Panel::new(synth, group))
            });

        let port = match self.synth.port_name() {
            Some(port_name) if synth.dump_state() == dump::State::InDump => {
                format!("{port_name}: syncing...")
            }
            Some(port_name) => port_name.to_string(),
            None => "Disconnected".to_string(),
        };

        let content = column![
            sections,
            row![
                text(port).size(ui::VALUE_TEXT_SIZE).width(Length::Units(200)),
                text(&self.output_text)
                    .size(ui::VALUE_TEXT_SIZE)
                    .width(Length::Fill),
            ]
            .spacing(20)
            .align_items(Alignment::Center),
        ]
        .spacing(20)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .style(ui::style::Background)
            .into()
    }
}
