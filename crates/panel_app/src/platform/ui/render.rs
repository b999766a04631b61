use panel_core::{PanelViewModel, HELP_TEXT, PANEL_TITLE};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::layout;

pub fn render(frame: &mut Frame, view: &PanelViewModel) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::styled(PANEL_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
        ]))
        .title_bottom(Line::from(LABEL_CLOSE).right_aligned());
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let areas = layout::split(
        inner,
        view.error.is_some(),
        view.show_url_form,
        view.uploading,
    );

    if let Some(error) = &view.error {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title_bottom(Line::from(LABEL_DISMISS_ERROR).right_aligned());
        frame.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block),
            areas.error,
        );
    }

    frame.render_widget(
        Paragraph::new(HELP_TEXT).wrap(Wrap { trim: true }),
        areas.help,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            button(LABEL_UPLOAD, view.upload_enabled),
            Span::raw("   "),
            button(LABEL_IMPORT_URL, view.url_toggle_enabled),
        ])),
        areas.buttons,
    );

    if view.show_url_form {
        render_url_form(frame, view, areas.url_form);
    }

    if view.uploading {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title_bottom(Line::from(LABEL_CANCEL_UPLOAD).right_aligned()),
            )
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio((view.progress_percent / 100.0).clamp(0.0, 1.0))
            .label(view.progress_label.as_str());
        frame.render_widget(gauge, areas.progress);
    }

    let footer = if view.importing_from_url {
        "Importing from URL..."
    } else if view.uploading {
        "Uploading..."
    } else {
        DROP_HINT
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        areas.footer,
    );
}

fn render_url_form(frame: &mut Frame, view: &PanelViewModel, area: Rect) {
    let input = if view.import_url.is_empty() {
        Span::styled(URL_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else if view.url_input_enabled {
        Span::raw(view.import_url.as_str())
    } else {
        Span::styled(
            view.import_url.as_str(),
            Style::default().fg(Color::DarkGray),
        )
    };
    let submit_style = if view.url_submit_enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Import", submit_style))
        .title_bottom(Line::from(URL_FORM_HINT).right_aligned());
    frame.render_widget(Paragraph::new(Line::from(input)).block(block), area);
}

fn button(label: &str, enabled: bool) -> Span<'_> {
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(label, style)
}
