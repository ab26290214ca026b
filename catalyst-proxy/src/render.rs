use catalyst_parser::{CellState, Grid};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

const SPACING: u32 = 22;
const RADIUS: u32 = 9;
const HEADER: u32 = 36;
const NOTICE_LINE: u32 = 18;

/// Draws the grid as one marker per day, week columns left to right and
/// Monday on the top row. Hovering a marker shows its tooltip.
pub fn render_svg(grid: &Grid, notices: &[String]) -> Result<Vec<u8>> {
    let width = ((grid.weeks() + 1) * SPACING).to_string();
    let grid_bottom = HEADER + 7 * SPACING;
    let height = (grid_bottom + NOTICE_LINE * notices.len() as u32 + SPACING / 2).to_string();
    let view_box = format!("0 0 {width} {height}");

    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Start(BytesStart::new("svg").with_attributes([
        ("xmlns", "http://www.w3.org/2000/svg"),
        ("width", width.as_str()),
        ("height", height.as_str()),
        ("viewBox", view_box.as_str()),
    ])))?;

    let center = ((grid.weeks() + 1) * SPACING / 2).to_string();
    let year = format!("{:04}", grid.year());
    writer
        .create_element("text")
        .with_attributes([
            ("x", center.as_str()),
            ("y", (HEADER - 12).to_string().as_str()),
            ("text-anchor", "middle"),
            ("font-family", "sans-serif"),
            ("font-size", "16"),
        ])
        .write_text_content(BytesText::new(&year))?;

    let radius = RADIUS.to_string();
    for cell in grid.cells() {
        let x = ((cell.week_index + 1) * SPACING).to_string();
        let y = (HEADER + cell.day_of_week * SPACING + SPACING / 2).to_string();

        let (fill, stroke) = match cell.state {
            CellState::Highlighted => ("gold", "black"),
            CellState::Empty => ("rgba(200,200,200,0.9)", "rgba(60,60,60,0.6)"),
        };

        let circle = writer.create_element("circle").with_attributes([
            ("cx", x.as_str()),
            ("cy", y.as_str()),
            ("r", radius.as_str()),
            ("fill", fill),
            ("stroke", stroke),
            ("stroke-width", "1"),
        ]);

        if cell.tooltip.is_empty() {
            circle.write_empty()?;
        } else {
            circle.write_inner_content(|writer| -> quick_xml::Result<()> {
                writer
                    .create_element("title")
                    .write_text_content(BytesText::new(&cell.tooltip))?;
                Ok(())
            })?;
        }
    }

    let notice_x = (SPACING / 2).to_string();
    for (idx, notice) in notices.iter().enumerate() {
        let y = (grid_bottom + NOTICE_LINE * (idx as u32 + 1)).to_string();
        writer
            .create_element("text")
            .with_attributes([
                ("x", notice_x.as_str()),
                ("y", y.as_str()),
                ("font-family", "sans-serif"),
                ("font-size", "12"),
                ("fill", "darkred"),
            ])
            .write_text_content(BytesText::new(notice))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    Ok(writer.into_inner())
}
