// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table, Widget},
};
use uu_procinfo::elapsed_time;

use crate::snapshot::Snapshot;

pub(crate) struct Tui<'a> {
    snapshot: &'a Snapshot,
}

impl Tui<'_> {
    pub(crate) fn new(snapshot: &'_ Snapshot) -> Tui<'_> {
        Tui { snapshot }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let text = Text::from(vec![
            Line::from(format!("OS: {}", self.snapshot.os)),
            Line::from(format!("Kernel: {}", self.snapshot.kernel)),
            Line::from(format!(
                "Total Processes: {}",
                self.snapshot.total_processes
            )),
            Line::from(format!(
                "Running Processes: {}",
                self.snapshot.running_processes
            )),
            Line::from(format!("Up Time: {}", elapsed_time(self.snapshot.uptime))),
        ]);

        Paragraph::new(text)
            .block(Block::new().borders(Borders::ALL).title("System"))
            .render(area, buf);
    }

    fn render_gauge(title: &str, fraction: f32, area: Rect, buf: &mut Buffer) {
        let ratio = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0) as f64
        };

        Gauge::default()
            .block(Block::new().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(format!("{:.1}/100%", ratio * 100.0))
            .render(area, buf);
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["PID", "USER", "CPU[%]", "RAM[MB]", "TIME+", "COMMAND"])
            .style(Style::default().fg(Color::Black).bg(Color::White));

        let rows = self.snapshot.processes.iter().map(|process| {
            Row::new([
                process.pid.to_string(),
                process.user.clone(),
                format!("{:.1}", process.cpu * 100.0),
                process.ram.clone(),
                elapsed_time(process.uptime),
                process.command.clone(),
            ])
        });

        let widths = [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Min(0),
        ];

        Widget::render(
            Table::new(rows, widths)
                .header(header)
                .block(Block::new().borders(Borders::ALL).title("Processes")),
            area,
            buf,
        );
    }
}

impl Widget for Tui<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // layout[0]: System information
        // layout[1]: CPU
        // layout[2]: Memory
        // layout[3]: Processes
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ],
        )
        .split(area);

        self.render_header(layout[0], buf);
        Self::render_gauge("CPU", self.snapshot.cpu, layout[1], buf);
        Self::render_gauge("Memory", self.snapshot.memory, layout[2], buf);
        self.render_table(layout[3], buf);
    }
}
