use {
    crate::{
        error::{Result, TerrainError},
        heightfield::HeightField,
        palette::{Color, Palette},
    },
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::Path,
    },
};

pub fn colorize(field: &HeightField, palette: Palette, water_level: f64) -> Vec<Color> {
    field
        .values()
        .iter()
        .map(|&height| palette.color(height, water_level))
        .collect()
}

/// Plain-text PPM (`P3`): header, then one `r g b` line per pixel, row-major.
pub fn write_ppm<W: Write>(writer: W, width: u32, height: u32, colors: &[Color]) -> Result<()> {
    check_len(width, height, colors)?;

    let mut writer = BufWriter::new(writer);
    write!(writer, "P3\n{width} {height}\n255\n")?;
    for color in colors {
        let [r, g, b] = color.to_rgb8();
        writeln!(writer, "{r} {g} {b}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `.ppm` paths as plain-text PPM; other extensions go through `image`.
pub fn save(path: &Path, width: u32, height: u32, colors: &[Color]) -> Result<()> {
    check_len(width, height, colors)?;

    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        write_ppm(File::create(path)?, width, height, colors)?;
    } else {
        let image = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb(colors[y as usize * width as usize + x as usize].to_rgb8())
        });
        image.save(path)?;
    }

    log::info!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}

fn check_len(width: u32, height: u32, colors: &[Color]) -> Result<()> {
    if colors.len() != width as usize * height as usize {
        return Err(TerrainError::ColorCountMismatch {
            colors: colors.len(),
            width,
            height,
        });
    }
    Ok(())
}
