/// Image display panes
///
/// Each pane shows a title, either the image or a placeholder hint, and a
/// save button once there is something to save.

use iced::widget::{button, column, container, image as image_widget, text, Column};
use iced::{Alignment, Element, Length};

use crate::Message;

/// A titled pane showing an image with a save affordance
///
/// `busy` suppresses the save button while a request is in flight so the
/// result cannot be saved mid-replacement.
pub fn image_pane<'a>(
    title: &'a str,
    bytes: Option<&[u8]>,
    placeholder_hint: &'a str,
    on_save: Message,
    busy: bool,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match bytes {
        Some(bytes) => {
            let handle = image_widget::Handle::from_bytes(bytes.to_vec());
            image_widget(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
        None => placeholder(placeholder_hint),
    };

    let mut content: Column<Message> = column![
        text(title).size(20),
        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(10)
            .style(container::bordered_box),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if bytes.is_some() && !busy {
        content = content.push(button("Save").on_press(on_save).padding(8));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
        .into()
}

/// Centered hint shown while a pane has no image
fn placeholder<'a>(hint: &'a str) -> Element<'a, Message> {
    container(text(hint).size(14))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
