//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each page section has a dedicated render function. Besides drawing,
//! rendering records where every interactive element landed in a
//! [`PageLayout`], which the effects layer uses to hit-test mouse events
//! against the frame the user is actually looking at.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::feedback::Region;
use crate::groups::FaqAccordion;
use crate::types::{Field, ThemeMode};
use crate::validation::rule;

use super::state::{App, Page, Target};
use super::theme::{self, Palette};

/// Rows given to an expanded FAQ answer.
const ANSWER_ROWS: u16 = 2;

const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

// ============================================================================
// HIT-TEST LAYOUT
// ============================================================================

/// Screen rectangles of the interactive elements in the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    targets: Vec<(Target, Rect)>,
}

impl PageLayout {
    fn add(&mut self, target: Target, rect: Rect) {
        self.targets.push((target, rect));
    }

    /// Element under a terminal cell, if any.
    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let position = Position::new(column, row);
        self.targets
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(target, _)| *target)
    }

    pub fn rect_of(&self, target: Target) -> Option<Rect> {
        self.targets
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, rect)| *rect)
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the page and return where its elements were placed.
pub fn render(app: &App, frame: &mut Frame) -> PageLayout {
    let page = &app.page;
    let area = frame.area();
    let palette = theme::palette(page.theme);

    frame.render_widget(Block::new().style(palette.base), area);

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(page.theme), chunks[0]);
    frame.render_widget(render_help(page.focus), chunks[2]);

    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(chunks[1]);

    let mut layout = PageLayout::default();
    render_events(page, &palette, frame, columns[0], &mut layout);
    render_interactive(page, &palette, frame, columns[1], &mut layout);
    render_form(page, &palette, frame, columns[2], &mut layout);
    layout
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(mode: ThemeMode) -> Paragraph<'static> {
    let mode_text = match mode {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
    };

    Paragraph::new(Line::from(vec![
        Span::styled("page-events-demo", theme::STYLE_TITLE),
        Span::styled(format!("  ({} mode)", mode_text), theme::STYLE_HELP),
    ]))
}

/// Help line; typing into an input changes what keys do.
fn render_help(focus: Option<Target>) -> Paragraph<'static> {
    let help_text = match focus {
        Some(Target::Input(_)) => "type to edit  [Backspace] delete  [Enter] submit  [Tab] next  [Esc] quit",
        _ => "[Tab/Shift-Tab] focus  [Enter/Space] activate  [+/-] counter  mouse: click & hover  [Esc] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

fn section<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, theme::STYLE_TITLE))
        .border_style(palette.border)
}

fn control_block<'a>(title: Option<&'a str>, focused: bool, palette: &Palette) -> Block<'a> {
    let block = Block::bordered().border_style(if focused {
        theme::STYLE_FOCUSED
    } else {
        palette.border
    });
    match title {
        Some(t) => block.title(t),
        None => block,
    }
}

fn render_button(label: &str, focused: bool, palette: &Palette, frame: &mut Frame, area: Rect) {
    let button = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(palette.base)
        .block(control_block(None, focused, palette));
    frame.render_widget(button, area);
}

fn is_focused(page: &Page, target: Target) -> bool {
    page.focus == Some(target)
}

// ============================================================================
// SECTION: EVENT HANDLING
// ============================================================================

fn render_events(
    page: &Page,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    layout: &mut PageLayout,
) {
    let block = section("Part 1: Event Handling", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(4), // click
        Constraint::Length(4), // hover
        Constraint::Length(4), // keypress
        Constraint::Length(3), // reset
        Constraint::Min(0),
    ])
    .split(inner);

    render_region(
        "Click",
        &page.events.click,
        is_focused(page, Target::ClickBox),
        palette,
        frame,
        rows[0],
    );
    layout.add(Target::ClickBox, rows[0]);

    render_region("Hover", &page.events.hover, false, palette, frame, rows[1]);
    layout.add(Target::HoverBox, rows[1]);

    let key_style = page
        .events
        .key_highlight
        .map(theme::highlight_style)
        .unwrap_or(palette.base);
    let keypress = Paragraph::new(vec![
        Line::from("Press any key on your keyboard"),
        Line::from(vec![
            Span::raw("Last key: "),
            Span::styled(page.events.last_key.clone(), theme::STYLE_TITLE),
        ]),
    ])
    .style(key_style)
    .block(control_block(Some("Keypress"), false, palette));
    frame.render_widget(keypress, rows[2]);

    render_button(
        "Reset Events",
        is_focused(page, Target::ResetEvents),
        palette,
        frame,
        rows[3],
    );
    layout.add(Target::ResetEvents, rows[3]);
}

fn render_region(
    title: &str,
    region: &Region,
    focused: bool,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let style = region
        .highlight
        .map(theme::highlight_style)
        .unwrap_or(palette.base);
    let paragraph = Paragraph::new(region.message)
        .wrap(Wrap { trim: true })
        .style(style)
        .block(control_block(Some(title), focused, palette));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SECTION: INTERACTIVE ELEMENTS
// ============================================================================

fn render_interactive(
    page: &Page,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    layout: &mut PageLayout,
) {
    let block = section("Part 2: Interactive Elements", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let faq_rows = faq_height(&page.faq);

    let rows = Layout::vertical([
        Constraint::Length(3),          // theme toggle
        Constraint::Length(3),          // counter
        Constraint::Length(faq_rows),   // faq
        Constraint::Min(0),             // tabs
    ])
    .split(inner);

    render_button(
        page.theme.toggle_label(),
        is_focused(page, Target::ThemeToggle),
        palette,
        frame,
        rows[0],
    );
    layout.add(Target::ThemeToggle, rows[0]);

    render_counter(page, palette, frame, rows[1], layout);
    render_faq(page, palette, frame, rows[2], layout);
    render_tabs(page, palette, frame, rows[3], layout);
}

fn render_counter(
    page: &Page,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    layout: &mut PageLayout,
) {
    let cells = Layout::horizontal([
        Constraint::Length(7),
        Constraint::Min(0),
        Constraint::Length(7),
    ])
    .split(area);

    render_button("-", is_focused(page, Target::Decrement), palette, frame, cells[0]);
    layout.add(Target::Decrement, cells[0]);

    let value = Paragraph::new(page.counter.value.to_string())
        .alignment(Alignment::Center)
        .style(palette.base.patch(theme::counter_style(page.counter.band())))
        .block(control_block(Some("Counter"), false, palette));
    frame.render_widget(value, cells[1]);

    render_button("+", is_focused(page, Target::Increment), palette, frame, cells[2]);
    layout.add(Target::Increment, cells[2]);
}

/// Rows of the FAQ block: borders, one per question, answers when expanded.
fn faq_height(faq: &FaqAccordion) -> u16 {
    faq.items
        .iter()
        .map(|item| if item.expanded { 1 + ANSWER_ROWS } else { 1 })
        .fold(2u16, u16::saturating_add)
}

fn render_faq(
    page: &Page,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    layout: &mut PageLayout,
) {
    let block = section("FAQ", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let constraints: Vec<Constraint> = page
        .faq
        .items
        .iter()
        .flat_map(|item| {
            let answer = if item.expanded { Some(Constraint::Length(ANSWER_ROWS)) } else { None };
            std::iter::once(Constraint::Length(1)).chain(answer)
        })
        .collect();
    let rows = Layout::vertical(constraints).split(inner);

    let mut row = 0;
    for (i, item) in page.faq.items.iter().enumerate() {
        let Some(&question_area) = rows.get(row) else {
            break;
        };
        row += 1;

        let question_style = if is_focused(page, Target::FaqQuestion(i)) {
            theme::STYLE_FOCUSED
        } else {
            Style::new()
        };
        let question = Paragraph::new(Line::from(vec![
            Span::styled(item.entry.question.clone(), question_style),
            Span::raw(" "),
            Span::styled(item.icon(), theme::STYLE_TITLE),
        ]));
        frame.render_widget(question, question_area);
        layout.add(Target::FaqQuestion(i), question_area);

        if item.expanded {
            if let Some(&answer_area) = rows.get(row) {
                let indented = Rect {
                    x: answer_area.x + 2,
                    width: answer_area.width.saturating_sub(2),
                    ..answer_area
                };
                if indented.width > 0 {
                    let answer = Paragraph::new(item.entry.answer.clone())
                        .wrap(Wrap { trim: true })
                        .style(theme::STYLE_HELP);
                    frame.render_widget(answer, indented);
                }
            }
            row += 1;
        }
    }
}

/// Header cell width: the label padded by one column on each side.
fn tab_width(label: &str) -> u16 {
    u16::try_from(label.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

fn render_tabs(
    page: &Page,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    layout: &mut PageLayout,
) {
    let block = section("Tabs", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(inner);

    let widths = page
        .tabs
        .headers
        .iter()
        .map(|h| Constraint::Length(tab_width(&h.label)))
        .chain(std::iter::once(Constraint::Min(0)));
    let header_cells = Layout::horizontal(widths).split(rows[0]);

    for (i, header) in page.tabs.headers.iter().enumerate() {
        let mut style = if page.tabs.is_active(i) {
            theme::STYLE_ACTIVE_TAB
        } else {
            palette.base
        };
        if is_focused(page, Target::TabHeader(i)) {
            style = style.add_modifier(ratatui::style::Modifier::UNDERLINED);
        }
        let cell = header_cells[i];
        frame.render_widget(
            Paragraph::new(format!(" {} ", header.label)).style(style),
            cell,
        );
        layout.add(Target::TabHeader(i), cell);
    }

    // A header whose target has no pane shows an empty body
    if let Some(pane) = page.tabs.active_pane() {
        let body = Paragraph::new(pane.body.clone()).wrap(Wrap { trim: true });
        frame.render_widget(body, rows[1]);
    }
}

// ============================================================================
// SECTION: FORM VALIDATION
// ============================================================================

fn render_form(
    page: &Page,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
    layout: &mut PageLayout,
) {
    let block = section("Part 3: Form Validation", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = Vec::new();
    for _ in Field::ALL {
        constraints.push(Constraint::Length(3)); // input
        constraints.push(Constraint::Length(1)); // inline error
    }
    constraints.push(Constraint::Length(3)); // submit
    constraints.push(Constraint::Length(1)); // success
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(inner);

    for field in Field::ALL {
        let input_area = rows[field.index() * 2];
        let error_area = rows[field.index() * 2 + 1];
        let focused = is_focused(page, Target::Input(field));
        let state = page.form.field(field);

        let mut shown = match field {
            Field::Password => "•".repeat(state.value.chars().count()),
            _ => state.value.clone(),
        };
        if focused {
            shown.push('▌');
        }

        let input = Paragraph::new(shown)
            .style(palette.base)
            .block(control_block(Some(field.label()), focused, palette));
        frame.render_widget(input, input_area);
        layout.add(Target::Input(field), input_area);

        if state.error_visible() {
            let error = Paragraph::new(Span::styled(rule(field).message, theme::STYLE_ERROR));
            frame.render_widget(error, error_area);
        }
    }

    let submit_area = rows[Field::ALL.len() * 2];
    render_button(
        "Submit",
        is_focused(page, Target::Submit),
        palette,
        frame,
        submit_area,
    );
    layout.add(Target::Submit, submit_area);

    if page.form.success_visible {
        let success = Paragraph::new(Span::styled(SUCCESS_MESSAGE, theme::STYLE_SUCCESS));
        frame.render_widget(success, rows[Field::ALL.len() * 2 + 1]);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::types::{FaqEntry, TabHeader, TabPane};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(150, 45);
        Terminal::new(backend).unwrap()
    }

    fn app() -> App {
        App::new(&PageConfig::default()).expect("rules compile")
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &App) -> PageLayout {
        let mut layout = PageLayout::default();
        terminal
            .draw(|frame| layout = render(app, frame))
            .expect("render should not panic");
        layout
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn center(rect: Rect) -> (u16, u16) {
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    #[test]
    fn default_page_renders_all_sections() {
        let mut terminal = make_terminal();
        draw(&mut terminal, &app());
        let content = buffer_text(&terminal);

        assert!(content.contains("Part 1: Event Handling"));
        assert!(content.contains("Part 2: Interactive Elements"));
        assert!(content.contains("Part 3: Form Validation"));
        assert!(content.contains("Click anywhere in this box"));
        assert!(content.contains("Last key: None"));
        assert!(content.contains("Dark Mode"));
    }

    #[test]
    fn every_target_is_hit_testable() {
        let mut terminal = make_terminal();
        let app = app();
        let layout = draw(&mut terminal, &app);

        let mut targets = app.page.focus_order();
        targets.push(Target::HoverBox);
        for target in targets {
            let rect = layout
                .rect_of(target)
                .unwrap_or_else(|| panic!("{:?} not laid out", target));
            let (x, y) = center(rect);
            assert_eq!(layout.target_at(x, y), Some(target));
        }
    }

    #[test]
    fn nothing_is_hit_on_the_title_bar() {
        let mut terminal = make_terminal();
        let layout = draw(&mut terminal, &app());
        assert_eq!(layout.target_at(0, 0), None);
    }

    #[test]
    fn counter_value_is_rendered() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.page.counter = app.page.counter.decrement().decrement();
        draw(&mut terminal, &app);
        assert!(buffer_text(&terminal).contains("-2"));
    }

    #[test]
    fn expanded_faq_shows_answer_and_minus_icon() {
        let mut terminal = make_terminal();
        let mut app = app();
        let answer = app.page.faq.items[0].entry.answer.clone();
        app.page.faq = app.page.faq.toggle(0);
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        let first_words: String = answer.split_whitespace().take(3).collect::<Vec<_>>().join(" ");
        assert!(content.contains(&first_words));
        assert!(content.contains("What is an event listener? -"));
    }

    #[test]
    fn dangling_tab_renders_without_pane() {
        let mut terminal = make_terminal();
        let config = PageConfig {
            tabs: vec![TabHeader {
                label: "Ghost".into(),
                target: "missing".into(),
            }],
            panes: vec![TabPane {
                id: "real".into(),
                body: "Never shown".into(),
            }],
            ..PageConfig::default()
        };
        let app = App::new(&config).unwrap();
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(content.contains("Ghost"));
        assert!(!content.contains("Never shown"));
    }

    #[test]
    fn password_is_masked_and_errors_shown() {
        let mut terminal = make_terminal();
        let mut app = app();
        let validator = app.context.validator.clone();
        app.page.form = app
            .page
            .form
            .clone()
            .input(Field::Password, "short", &validator)
            .input(Field::Email, "bad", &validator);
        draw(&mut terminal, &app);

        let content = buffer_text(&terminal);
        assert!(!content.contains("short"));
        assert!(content.contains("•••••"));
        assert!(content.contains("Please enter a valid email"));
    }

    #[test]
    fn success_message_renders_when_visible() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.page.form.success_visible = true;
        draw(&mut terminal, &app);
        assert!(buffer_text(&terminal).contains(SUCCESS_MESSAGE));
    }

    #[test]
    fn dark_theme_renders_light_mode_label() {
        let mut terminal = make_terminal();
        let mut app = app();
        app.page.theme = ThemeMode::Dark;
        draw(&mut terminal, &app);
        let content = buffer_text(&terminal);
        assert!(content.contains("Light Mode"));
        assert!(content.contains("(dark mode)"));
    }

    #[test]
    fn tiny_terminal_renders_without_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        let mut app = app();
        app.page.faq = app.page.faq.toggle(0).toggle(1).toggle(2);
        draw(&mut terminal, &app);
    }

    #[test]
    fn help_depends_on_focus() {
        let mut terminal = make_terminal();
        let mut app = app();

        app.page.focus = Some(Target::Input(Field::Name));
        draw(&mut terminal, &app);
        let content = buffer_text(&terminal);
        assert!(content.contains("[Backspace] delete"));
        assert!(!content.contains("[+/-] counter"));

        app.page.focus = Some(Target::ThemeToggle);
        draw(&mut terminal, &app);
        let content = buffer_text(&terminal);
        assert!(content.contains("[+/-] counter"));
        assert!(!content.contains("[Backspace] delete"));
    }

    #[test]
    fn faq_height_saturates() {
        let entries: Vec<FaqEntry> = (0..30_000)
            .map(|i| FaqEntry {
                question: format!("Q{i}"),
                answer: "A".to_string(),
            })
            .collect();
        let mut faq = FaqAccordion::new(&entries);
        assert_eq!(faq_height(&faq), 30_002);

        for item in &mut faq.items {
            item.expanded = true;
        }
        assert_eq!(faq_height(&faq), u16::MAX);
    }

    #[test]
    fn tab_width_saturates() {
        assert_eq!(tab_width("HTML"), 6);
        assert_eq!(tab_width(&"x".repeat(70_000)), u16::MAX);
    }

    #[test]
    fn overlong_tab_label_renders_without_panic() {
        let config = PageConfig {
            tabs: vec![TabHeader {
                label: "x".repeat(70_000),
                target: "html".to_string(),
            }],
            ..PageConfig::default()
        };
        let app = App::new(&config).unwrap();
        let mut terminal = make_terminal();
        draw(&mut terminal, &app);
    }
}
