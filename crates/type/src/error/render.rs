// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use crate::{error::diagnostic::Diagnostic, fragment::Fragment};

pub trait DiagnosticRenderer {
	fn render(&self, diagnostic: &Diagnostic, source: Option<&str>) -> String;
}

pub struct DefaultRenderer;

pub fn get_line(source: &str, line: u32) -> &str {
	source.lines().nth(line.saturating_sub(1) as usize).unwrap_or("")
}

impl DiagnosticRenderer for DefaultRenderer {
	fn render(&self, d: &Diagnostic, source: Option<&str>) -> String {
		let mut output = String::new();

		let _ = writeln!(&mut output, "error[{}]: {}", d.code, d.message);

		if let Fragment::Statement {
			text,
			line,
			column,
		} = &d.fragment
		{
			let line_number_width = line.0.to_string().len().max(2);
			let line_content = match source {
				Some(source) => get_line(source, line.0),
				None => text.as_str(),
			};
			let caret_offset = if source.is_some() {
				column.0 as usize
			} else {
				0
			};

			let _ = writeln!(
				&mut output,
				" {0:>width$} │ {1}",
				line.0,
				line_content,
				width = line_number_width
			);
			let _ = writeln!(
				&mut output,
				" {0:>width$} │ {1}{2}",
				"",
				" ".repeat(caret_offset),
				"^".repeat(text.chars().count().max(1)),
				width = line_number_width
			);
			if let Some(label) = &d.label {
				let _ = writeln!(&mut output, " {0:>width$} = {1}", "", label, width = line_number_width);
			}
		} else if let Some(label) = &d.label {
			let _ = writeln!(&mut output, "  = {}", label);
		}

		if let Some(help) = &d.help {
			let _ = writeln!(&mut output, "\nhelp: {}", help);
		}

		for note in &d.notes {
			let _ = writeln!(&mut output, "\nnote: {}", note);
		}

		output
	}
}

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic, source: Option<&str>) -> String {
		DefaultRenderer.render(diagnostic, source)
	}
}
