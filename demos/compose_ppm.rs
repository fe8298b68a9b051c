//! Render a small overlay batch to `target/scrim_demo.ppm`.
//!
//! Run with `cargo run --example compose_ppm`.

use std::fs::File;
use std::io::{BufWriter, Write};

use scrim::{ComposeOptions, DrawList, PixelRect, SurfaceTarget, compose};

fn main() -> anyhow::Result<()> {
    let (w, h) = (320u32, 240u32);
    let mut data = vec![0u8; (w * h * 3) as usize];
    for y in 0..h {
        for x in 0..w {
            let i = ((y * w + x) * 3) as usize;
            data[i] = (x * 255 / w) as u8;
            data[i + 1] = (y * 255 / h) as u8;
            data[i + 2] = 96;
        }
    }

    let mut list = DrawList::new();
    list.box_blur(PixelRect::new(180, 20, 300, 100), 9)?;
    list.rect(20.0, 20.0, 150.0, 90.0, -1, [20, 20, 20, 180])?;
    list.rect(20.0, 20.0, 150.0, 90.0, 2, [255, 255, 255, 255])?;
    list.rotated_rect(230.0, 170.0, 90.0, 50.0, 0.4, -1, [220, 60, 40, 230], true)?;
    list.circle(90.0, 170.0, 36.0, 5, [40, 220, 120, 255])?;
    let plan = list.build();

    let mut target = SurfaceTarget::Rgb {
        data: &mut data,
        stride: (w * 3) as usize,
        width: w,
        height: h,
    };
    compose(&mut target, &plan, &ComposeOptions::default())?;

    let path = "target/scrim_demo.ppm";
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "P6\n{w} {h}\n255")?;
    out.write_all(&data)?;
    println!("wrote {path}");
    Ok(())
}
