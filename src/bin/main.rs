use anyhow::{bail, Context, Result};
use editable::geometry_utilities::map_point;
use editable::input::PointerEvent;
use editable::options::EditableOptions;
use editable::surface::PlanarView;
use editable::Editable;
use log::info;

struct Args {
    zoom: f64,
    touch: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        zoom: 100.0,
        touch: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--zoom" => {
                let value = iter.next().context("--zoom needs a value")?;
                args.zoom = value.parse().with_context(|| format!("invalid zoom '{}'", value))?;
            }
            "--touch" => args.touch = true,
            other => bail!("unknown argument '{}'", other),
        }
    }
    Ok(args)
}

fn tap(editable: &mut Editable<PlanarView>, event: PointerEvent) {
    editable.pointer_move(event);
    editable.pointer_down(event);
    editable.pointer_up(event);
    editable.click(event);
}

/// Draws a ring with a hole through the pointer interface and logs what happens.
fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;
    let options = if args.touch {
        EditableOptions::touch()
    } else {
        EditableOptions::default()
    };
    let event = |x, y| {
        if args.touch {
            PointerEvent::touch(map_point(x, y))
        } else {
            PointerEvent::mouse(map_point(x, y))
        }
    };

    let mut editable = Editable::new(PlanarView::with_zoom(args.zoom), options);
    let ring = editable.start_ring();
    for (x, y) in [(-2.0, -2.0), (2.0, -2.0), (2.0, 2.0), (-2.0, 2.0)] {
        tap(&mut editable, event(x, y));
    }
    // Clicking the last vertex finishes the ring
    tap(&mut editable, event(-2.0, 2.0));

    editable.start_hole(ring).context("ring editor is gone")?;
    for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (0.0, 1.0)] {
        tap(&mut editable, event(x, y));
    }
    editable.finish_drawing(ring);

    // Pull a new vertex out of the middle of the top edge
    editable.pointer_down(event(0.0, -2.0));
    editable.pointer_move(event(0.0, -3.0));
    editable.pointer_up(event(0.0, -3.0));

    for event in editable.drain_events() {
        info!("{:?}", event);
    }

    let geometry = editable.geometry(ring).context("ring was not created")?;
    info!(
        "ring has {} rings, {} points, version {}",
        geometry.ring_count(),
        geometry.point_count(),
        geometry.version()
    );
    for (i, ring) in geometry.rings().iter().enumerate() {
        let points: Vec<_> = ring.positions().map(|p| (p.x, p.y)).collect();
        println!("ring {}: {:?}", i, points);
    }
    println!("outline events: {}", geometry.to_path().iter().count());
    Ok(())
}
