use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_pincode::PinInput;
use ratatui_pincode::PinInputError;
use ratatui_pincode::PinInputOptions;
use ratatui_pincode::PinTheme;
use ratatui_pincode::input::InputEvent;

#[test]
fn facade_exposes_the_widget() {
    assert_eq!(PinInput::new(0).unwrap_err(), PinInputError::ZeroLength);

    let mut pin = PinInput::with_options(PinInputOptions {
        pin_theme: PinTheme::underline(),
        ..PinInputOptions::new(2)
    })
    .unwrap();
    pin.focus();
    let mut value = String::new();
    pin.handle_event(&mut value, InputEvent::Paste("ab".to_string()));
    assert_eq!(value, "ab");

    let area = Rect::new(0, 0, 11, 3);
    let mut buf = Buffer::empty(area);
    pin.render(area, &mut buf, &value);
    assert_eq!(buf.cell((2, 1)).unwrap().symbol(), "a");
    assert_eq!(buf.cell((8, 1)).unwrap().symbol(), "b");
    assert_eq!(buf.cell((0, 2)).unwrap().symbol(), "━");
}
