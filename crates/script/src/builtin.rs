use crate::{selected_layers_report, selected_page, ArtboardOptions, DrawBuilder, ShapeOptions};
use node::{Color, Frame, ShapeType, Style};
use scene_graph::{Document, Result};
use strum::{Display, EnumIter, EnumString};

/// Scripts that ship with the tool, runnable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltinScript {
    /// Clear the page, add a named artboard and one square.
    FirstDraw,
    /// Clear the page, add an artboard and two squares side by side.
    SecondDraw,
    /// Like `second-draw`, plus a small square and a bordered circle.
    AnotherScript,
    /// Log the selected layers.
    SelectedLayers,
    /// Pen-style drawing: two filled rectangles.
    PagebotDemo,
}

impl BuiltinScript {
    /// Runs the script against `document`.
    ///
    /// Returns the lines the script logged.
    pub fn run(self, document: &mut Document) -> Result<Vec<String>> {
        log::debug!("running script {self}");
        match self {
            Self::FirstDraw => first_draw(document).map(|_| Vec::new()),
            Self::SecondDraw => second_draw(document, false).map(|_| Vec::new()),
            Self::AnotherScript => second_draw(document, true).map(|_| Vec::new()),
            Self::SelectedLayers => Ok(selected_layers_report(document)),
            Self::PagebotDemo => pagebot_demo(document).map(|_| Vec::new()),
        }
    }
}

fn square(x: f64, y: f64, size: f64, fill: &str) -> Result<ShapeOptions> {
    Ok(ShapeOptions::new(Frame::new(x, y, size, size)?).style(Style::parse(&[fill], &[])?))
}

fn canvas() -> Result<ArtboardOptions> {
    Ok(ArtboardOptions::new(Frame::new(0.0, 0.0, 400.0, 400.0)?))
}

fn first_draw(document: &mut Document) -> Result<()> {
    let mut page = selected_page(document)?;
    page.clear()?;
    let artboard = page.add_artboard(canvas()?.name("My Artboard Name"))?;
    page.add_shape(square(53.0, 213.0, 122.0, "#35E6C9")?.parent(artboard))?;
    Ok(())
}

fn second_draw(document: &mut Document, extended: bool) -> Result<()> {
    let mut page = selected_page(document)?;
    page.clear()?;
    let artboard = page.add_artboard(canvas()?)?;
    page.add_shape(square(53.0, 213.0, 122.0, "#35E6C9")?.parent(artboard))?;
    page.add_shape(square(253.0, 213.0, 122.0, "#d5ffb3")?.parent(artboard))?;
    if !extended {
        return Ok(());
    }

    page.add_shape(square(253.0, 313.0, 50.0, "#0000DD")?.parent(artboard))?;
    page.add_shape(
        ShapeOptions::new(Frame::new(253.0, 213.0, 122.0, 122.0)?)
            .shape_type(ShapeType::Oval)
            .parent(artboard)
            .style(Style::parse(&["#FF0000"], &[("#00FF00", 16.0)])?),
    )?;
    Ok(())
}

fn pagebot_demo(document: &mut Document) -> Result<()> {
    let mut b = DrawBuilder::new(document);
    b.new_document(400.0, 400.0)?;
    b.fill(Color::parse("red")?);
    b.rect(10.0, 20.0, 250.0, 200.0)?;
    b.fill(Color::parse("darkblue")?);
    b.rect(300.0, 20.0, 250.0, 200.0)?;
    Ok(())
}
