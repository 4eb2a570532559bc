use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableFocusChange;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableFocusChange;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_pincode::PinInput;
use ratatui_pincode::PinInputAction;
use ratatui_pincode::PinInputOptions;
use ratatui_pincode::PinTheme;
use ratatui_pincode::crossterm_input::input_event_from_crossterm;
use ratatui_pincode::cursor::CursorAnimation;
use ratatui_pincode::pin_input::PinKeyboard;
use ratatui_pincode::style::BorderWeight;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

struct Field {
    label: &'static str,
    pin: PinInput,
    value: String,
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let status = Rc::new(RefCell::new(String::from("Click a field or press Tab")));
    let res = build_fields(&status).and_then(|mut fields| run(&mut terminal, &mut fields, &status));

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn build_fields(status: &Rc<RefCell<String>>) -> io::Result<Vec<Field>> {
    let otp_status = Rc::clone(status);
    let otp = PinInput::with_options(PinInputOptions {
        animation_type: CursorAnimation::Slide,
        keyboard: PinKeyboard::Numeric,
        pin_theme: PinTheme {
            active_color: Color::Green,
            selected_color: Color::Cyan,
            ..PinTheme::default()
        },
        ..PinInputOptions::new(6)
    })
    .map_err(io::Error::other)?
    .on_completed(move |code| *otp_status.borrow_mut() = format!("One-time code entered: {code}"));

    let pin_status = Rc::clone(status);
    let pin = PinInput::with_options(PinInputOptions {
        obscure_text: true,
        obscuring_character: "•".to_string(),
        spacing: 2,
        pin_theme: PinTheme {
            selected_border_width: BorderWeight::Double,
            field_width: 3,
            ..PinTheme::underline()
        },
        ..PinInputOptions::new(4)
    })
    .map_err(io::Error::other)?
    .on_changed(move |v| {
        *pin_status.borrow_mut() = format!("PIN has {} of 4 characters", v.chars().count())
    });

    Ok(vec![
        Field {
            label: "One-time code (digits, slide cursor)",
            pin: otp,
            value: String::new(),
        },
        Field {
            label: "PIN (obscured, underline)",
            pin,
            value: String::new(),
        },
    ])
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    fields: &mut [Field],
    status: &Rc<RefCell<String>>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let [top, bottom, help] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Length(5),
                    Constraint::Min(1),
                ])
                .areas(area);

            for (field, slot) in fields.iter_mut().zip([top, bottom]) {
                let block = Block::default().title(field.label).borders(Borders::ALL);
                let inner = block.inner(slot);
                f.render_widget(block, slot);
                field.pin.render(inner, f.buffer_mut(), &field.value);
            }

            let line = format!(
                "{}  |  Tab: next  Enter: reset  Esc: blur  Ctrl+C: quit",
                status.borrow()
            );
            let span = Span::styled(line, Style::default().fg(Color::DarkGray));
            f.buffer_mut().set_span(help.x, help.y, &span, help.width);
        })?;

        let now = std::time::Instant::now();
        // Sleep until the next cursor change (transition tick or blink edge).
        let timeout = fields
            .iter()
            .filter_map(|fd| fd.pin.next_frame_in(now))
            .min()
            .unwrap_or(Duration::from_secs(1));
        if !crossterm::event::poll(timeout)? {
            continue;
        }

        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            if key.code == KeyCode::Tab {
                cycle_focus(fields);
                continue;
            }
            if key.code == KeyCode::Enter {
                for fd in fields.iter_mut().filter(|fd| fd.pin.is_focused()) {
                    fd.value.clear();
                }
                continue;
            }
        }

        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        for fd in fields.iter_mut() {
            let action = fd.pin.handle_event(&mut fd.value, ev.clone());
            if matches!(action, PinInputAction::Completed(_)) {
                fd.pin.blur();
            }
        }
    }
}

fn cycle_focus(fields: &mut [Field]) {
    let next = fields
        .iter()
        .position(|fd| fd.pin.is_focused())
        .map(|i| (i + 1) % fields.len())
        .unwrap_or(0);
    for (i, fd) in fields.iter_mut().enumerate() {
        fd.pin.set_focused(i == next);
    }
}
