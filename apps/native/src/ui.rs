use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Color, Element, Fill, Length};

use crate::search::{icon_color, icon_glyph, shorten_label};
use crate::{App, Message, ITEM_FONT_SIZE, LABEL_MAX_CHARS, STATUS_FONT_SIZE};

pub(crate) fn view(app: &App) -> Element<'_, Message> {
    let prompt = row![
        text_input("Search your drive...", &app.query)
            .on_input(Message::QueryChanged)
            .on_submit(Message::SearchControlPressed)
            .padding(8)
            .size(18)
            .width(Fill),
        button(text(app.controller.label().as_str()))
            .on_press(Message::SearchControlPressed)
            .style(button::primary)
            .padding([6, 12]),
        button(text("Sign out"))
            .on_press_maybe(
                app.auth
                    .is_signed_in()
                    .then_some(Message::SignOutPressed)
            )
            .style(button::secondary)
            .padding([6, 12]),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut listed = column![];
    for item in app.controller.results() {
        listed = listed.push(
            container(
                row![
                    text(icon_glyph(item.icon))
                        .color(icon_color(item.icon))
                        .size(ITEM_FONT_SIZE)
                        .width(Length::Fixed(36.0)),
                    text(shorten_label(&item.label, LABEL_MAX_CHARS))
                        .size(ITEM_FONT_SIZE)
                        .width(Fill),
                ]
                .align_y(Alignment::Center)
                .spacing(8)
                .padding(6),
            )
            .width(Fill),
        );
    }

    let content = column![
        prompt,
        scrollable(listed).height(Length::Fill),
        text(&app.status)
            .size(STATUS_FONT_SIZE)
            .color(Color::from_rgb8(145, 150, 160)),
    ]
    .spacing(10)
    .padding(12);

    container(content)
        .width(Fill)
        .height(Fill)
        .style(container::rounded_box)
        .into()
}
