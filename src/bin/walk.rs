//! Walk around a generated grid map.
//!
//! ```bash
//! cargo run --release -- --seed 7
//! ```
//!
//! Arrows move and turn, `A`/`S` look up/down, `D`/`F` jump up/down,
//! `Esc` quits.

use std::time::{Duration, Instant};

use clap::Parser;
use glam::vec2;
use minifb::{Key, Window, WindowOptions};
use rand::{SeedableRng, rngs::StdRng};

use yaray_rs::{
    renderer::{
        Renderer, Scene, SceneTextures,
        software::{DEFAULT_LIGHT_RANGE, DEFAULT_MAX_RANGE, Software},
    },
    sim::{ControlState, Player},
    world::{Camera, Grid, SpriteKind, SpriteMap, Texture, TextureBank},
};

/// Updates longer than this are dropped whole rather than integrated;
/// a huge step after a stall would teleport the player through walls.
const MAX_FRAME_SECONDS: f32 = 0.2;

#[derive(Parser)]
#[command(about = "Software raycaster demo: walk a generated map")]
struct Args {
    #[arg(long, default_value_t = 1024)]
    width: usize,
    #[arg(long, default_value_t = 640)]
    height: usize,
    /// Horizontal field of view, degrees.
    #[arg(long, default_value_t = 66.0)]
    fov: f32,
    /// Map side length in cells.
    #[arg(long, default_value_t = 32)]
    map_size: usize,
    /// World seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Distance (cells) over which surfaces fade to darkness.
    #[arg(long, default_value_t = DEFAULT_LIGHT_RANGE)]
    light_range: f32,
    /// Ray march budget in grid lines.
    #[arg(long, default_value_t = DEFAULT_MAX_RANGE)]
    max_range: i32,
    /// Ambient light boost, 0..1.
    #[arg(long, default_value_t = 0.0)]
    ambient: f32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = Grid::generate(args.map_size, &mut rng);
    let sprites = SpriteMap::demo();
    println!("map seed: {seed}");

    let (bank, textures, weapon) = build_textures()?;

    let (spawn_x, spawn_y) = grid
        .spawn_point()
        .ok_or_else(|| anyhow::anyhow!("generated map has no empty cell"))?;
    let plane_mag = (args.fov.to_radians() * 0.5).tan();
    let camera = Camera::new(
        vec2(spawn_x, spawn_y),
        vec2(-1.0, 0.0),
        vec2(0.0, plane_mag),
    );
    let mut player = Player::new(camera);

    let mut renderer = Software::new(args.max_range, args.light_range);

    let mut win = Window::new(
        "yaray walk",
        args.width,
        args.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    let mut last_frame = Instant::now();
    while win.is_open() && !win.is_key_down(Key::Escape) {
        let seconds = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();
        if seconds >= MAX_FRAME_SECONDS {
            win.update(); // keep the event pump alive, drop the step
            continue;
        }

        player.update(controls(&win), &grid, seconds);

        let t0 = Instant::now();
        let scene = Scene {
            grid: &grid,
            sprites: &sprites,
            camera: &player.camera,
            textures,
            ambient: args.ambient,
        };
        renderer.begin_frame(args.width, args.height);
        renderer.draw_view(&scene, &bank);
        renderer.draw_overlay(weapon, &bank, player.paces);

        let mut frame_err = Ok(());
        renderer.end_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            frame_err = win.update_with_buffer(fb, w, h);
        });
        frame_err?;

        // ─────────── report every ~3 s ──────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    Ok(())
}

/// Sample the held-key state for this tick.
fn controls(win: &Window) -> ControlState {
    let mut c = ControlState::default();
    c.apply(ControlState::LEFT, win.is_key_down(Key::Left));
    c.apply(ControlState::RIGHT, win.is_key_down(Key::Right));
    c.apply(ControlState::FORWARD, win.is_key_down(Key::Up));
    c.apply(ControlState::BACKWARD, win.is_key_down(Key::Down));
    c.apply(ControlState::LOOK_UP, win.is_key_down(Key::A));
    c.apply(ControlState::LOOK_DOWN, win.is_key_down(Key::S));
    c.apply(ControlState::JUMP_UP, win.is_key_down(Key::D));
    c.apply(ControlState::JUMP_DOWN, win.is_key_down(Key::F));
    c
}

/*──────────────────────── procedural textures ───────────────────────────*/

const OPAQUE: u32 = 0xFF_00_00_00;
const CLEAR: u32 = 0;

fn rgb(r: u32, g: u32, b: u32) -> u32 {
    OPAQUE | r << 16 | g << 8 | b
}

/// Tiny deterministic hash for per-texel variation.
fn jitter(x: usize, y: usize) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x9E37_79B9) ^ (y as u32).wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h.wrapping_mul(0xC2B2_AE35) >> 28
}

fn make(name: &str, w: usize, h: usize, f: impl Fn(usize, usize) -> u32) -> Texture {
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            pixels.push(f(x, y));
        }
    }
    Texture {
        name: name.into(),
        w,
        h,
        pixels,
    }
}

fn brick_wall() -> Texture {
    make("WALL", 64, 64, |x, y| {
        let row = y / 16;
        let off = if row % 2 == 0 { 0 } else { 16 };
        let in_mortar = y % 16 < 2 || (x + off) % 32 < 2;
        if in_mortar {
            rgb(0x58, 0x52, 0x4C)
        } else {
            let v = jitter(x / 32 + row * 7, row);
            rgb(0x8E + v, 0x4C + v / 2, 0x3C)
        }
    })
}

fn floor_tiles() -> Texture {
    make("FLOOR", 64, 64, |x, y| {
        if x % 32 < 2 || y % 32 < 2 {
            rgb(0x3A, 0x38, 0x34)
        } else {
            let v = jitter(x, y);
            rgb(0x6E + v, 0x6A + v, 0x60 + v)
        }
    })
}

fn ceiling_plates() -> Texture {
    make("CEIL", 64, 64, |x, y| {
        if x % 16 == 0 || y % 16 == 0 {
            rgb(0x30, 0x2C, 0x2A)
        } else {
            let v = jitter(y, x) / 2;
            rgb(0x48 + v, 0x42 + v, 0x40 + v)
        }
    })
}

/// Dusk gradient with a low sun; wide enough to wrap a full turn.
fn sky_panorama() -> Texture {
    let (w, h) = (512, 128);
    make("SKY", w, h, |x, y| {
        let t = y as f32 / h as f32;
        let r = 0x28 as f32 + t * 0xB0 as f32;
        let g = 0x30 as f32 + t * 0x60 as f32;
        let b = 0x60 as f32 + t * 0x10 as f32;

        let dx = x as f32 - w as f32 * 0.7;
        let dy = y as f32 - h as f32 * 0.78;
        if dx * dx + dy * dy < 90.0 {
            rgb(0xFF, 0xE8, 0xB0)
        } else {
            rgb(r as u32, g as u32, b as u32)
        }
    })
}

/// Billboard sprite of the given footprint: an alpha-keyed blob with a
/// solid core, so the transparency path gets exercised on every kind.
fn blob(name: &str, w: usize, h: usize, core: u32, rim: u32) -> Texture {
    make(name, w, h, |x, y| {
        let nx = (x as f32 + 0.5) / w as f32 * 2.0 - 1.0;
        let ny = (y as f32 + 0.5) / h as f32 * 2.0 - 1.0;
        let d = nx * nx + ny * ny;
        if d > 1.0 {
            CLEAR
        } else if d > 0.55 {
            rim
        } else {
            let v = jitter(x, y) / 2;
            core.wrapping_add(v << 8)
        }
    })
}

fn pillar() -> Texture {
    make("PILLAR", 24, 64, |x, y| {
        let edge = x < 2 || x >= 22;
        let band = y < 4 || y >= 60;
        if edge && !band {
            CLEAR
        } else if band || x < 4 || x >= 20 {
            rgb(0x5C, 0x5C, 0x64)
        } else {
            let v = jitter(x, y / 8);
            rgb(0x84 + v, 0x84 + v, 0x8C + v)
        }
    })
}

fn tree() -> Texture {
    make("TREE", 48, 64, |x, y| {
        let cx = (x as f32 - 24.0).abs();
        // triangular canopy over a trunk
        if y < 48 {
            let half_width = 4.0 + y as f32 * 0.45;
            if cx < half_width {
                let v = jitter(x, y) / 2;
                rgb(0x1E, 0x55 + v, 0x26)
            } else {
                CLEAR
            }
        } else if cx < 4.0 {
            rgb(0x54, 0x38, 0x20)
        } else {
            CLEAR
        }
    })
}

fn knife() -> Texture {
    make("KNIFE", 96, 96, |x, y| {
        // blade along the main diagonal, handle in the lower-right
        let along = x as f32 + y as f32;
        let across = (x as f32 - y as f32).abs();
        if (90.0..150.0).contains(&along) && across < 26.0 - along * 0.1 {
            let v = jitter(x / 4, y / 4);
            rgb(0xB8 + v, 0xBC + v, 0xC8 + v)
        } else if (150.0..176.0).contains(&along) && across < 12.0 {
            rgb(0x4E, 0x32, 0x1E)
        } else {
            CLEAR
        }
    })
}

/// Build the whole demo texture set and the fixed-surface handle block.
fn build_textures() -> anyhow::Result<(TextureBank, SceneTextures, yaray_rs::world::TextureId)> {
    let mut bank = TextureBank::default_with_checker();

    let wall = bank.insert("WALL", brick_wall())?;
    let floor = bank.insert("FLOOR", floor_tiles())?;
    let ceiling = bank.insert("CEIL", ceiling_plates())?;
    let sky = bank.insert("SKY", sky_panorama())?;

    use SpriteKind::*;
    bank.insert(
        GreenLight.texture_name(),
        blob("GREENLIGHT", 32, 32, rgb(0x48, 0xE8, 0x58), rgb(0x20, 0x70, 0x2C)),
    )?;
    bank.insert(
        Barrel.texture_name(),
        blob("BARREL", 32, 40, rgb(0x7A, 0x4A, 0x28), rgb(0x4A, 0x2E, 0x18)),
    )?;
    bank.insert(
        Vase.texture_name(),
        blob("VASE", 32, 36, rgb(0xB0, 0x62, 0x3E), rgb(0x6E, 0x3C, 0x26)),
    )?;
    bank.insert(
        Bush.texture_name(),
        blob("BUSH", 32, 20, rgb(0x2A, 0x66, 0x2E), rgb(0x1C, 0x44, 0x20)),
    )?;
    bank.insert(Pillar.texture_name(), pillar())?;
    bank.insert(Tree.texture_name(), tree())?;

    let weapon = bank.insert("KNIFE", knife())?;

    Ok((
        bank,
        SceneTextures {
            wall,
            floor,
            ceiling,
            sky,
        },
        weapon,
    ))
}
