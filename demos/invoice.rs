use pdf_flow::layout::{
    Margins, PageGeometry, PaginatedRowRenderer, Paragraph, RowUnit, Separator, TableRow,
    TextAlign, TextBox, VerticalAlign,
};
use pdf_flow::{pagesize, Canvas, Document, Font, Info, Mm, PdfCanvas, Pt, Rect};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // any TrueType font will do; pass its path as the first argument
    let font_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string());
    let font = Font::load(std::fs::read(font_path)?)?;

    let mut doc = Document::default();
    doc.set_info(
        Info::new()
            .title("Invoice 2024-0042")
            .author("Example Trading Company Ltd.")
            .creator("invoice demo")
            .clone(),
    );

    // A4 with 20mm margins, keeping room for a page number at the bottom
    let geometry = PageGeometry::new(pagesize::A4, Margins::all(Mm(20.0)))
        .with_footer_reservation(Pt(30.0));
    let mut canvas = PdfCanvas::new(doc, geometry, font);

    // the address window of a DIN 5008 envelope
    let mut address = TextBox::new(Rect::new(
        Mm(20.0).into(),
        Mm(297.0 - 90.0).into(),
        Mm(105.0).into(),
        Mm(297.0 - 45.0).into(),
    ));
    address
        .content("Jane Example\nExample Street 1\n12345 Example City")
        .vertical_align(VerticalAlign::CenterTop);
    address.render(&mut canvas)?;

    canvas.set_cursor_position(geometry.content_left(), Mm(297.0 - 100.0).into());
    Paragraph::new("Invoice 2024-0042", Pt(16.0))
        .spacing(Pt(0.0), Pt(12.0))
        .render(&mut canvas)?;

    let header = TableRow::new("labels", Pt(9.0))
        .cell(Pt(70.0), "Code", TextAlign::Left)
        .cell(Pt(260.0), "Description", TextAlign::Left)
        .cell(Pt(40.0), "Qty", TextAlign::Right)
        .cell(Pt(80.0), "Amount", TextAlign::Right)
        .padding(Pt(4.0));
    let rows: Vec<TableRow> = (1..=60)
        .map(|i| {
            TableRow::new(format!("P-{i:03}"), Pt(10.0))
                .cell(Pt(70.0), format!("P-{i:03}"), TextAlign::Left)
                .cell(Pt(260.0), lipsum::lipsum(4 + i % 9), TextAlign::Left)
                .cell(Pt(40.0), format!("{}", 1 + i % 4), TextAlign::Right)
                .cell(Pt(80.0), format!("{}.00", 40 * i), TextAlign::Right)
                .padding(Pt(4.0))
        })
        .collect();

    let footer_y = geometry.margins.bottom;
    let summary = PaginatedRowRenderer::new()
        .with_header(&header)
        .with_separator(Separator::default())
        .with_footer(move |canvas: &mut PdfCanvas, page| {
            let rect = Rect::new(
                geometry.content_left(),
                footer_y,
                geometry.content_right(),
                footer_y + Pt(14.0),
            );
            canvas.draw_bounded_text(rect, &format!("Page {}", page + 1), Pt(9.0), TextAlign::Right)
        })
        .render_rows(&mut canvas, &rows)?;
    println!(
        "placed {} rows on {} pages",
        summary.placements.len(),
        summary.pages_used
    );

    let mut out = std::fs::File::create("invoice.pdf")?;
    canvas.write(&mut out)?;
    Ok(())
}
