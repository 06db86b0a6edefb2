//! Terminal HUD.
//!
//! Renders a [`Snapshot`] as colored register bars with a ship overlay,
//! the NZCV flag line, and the command reference. All state here is
//! cosmetic: the ship positions belong to the HUD, never to the core.
//! `--plain` mode prints a single uncolored frame per redraw with no
//! screen clearing and no sleeps.

use crate::cpu::{Snapshot, NUM_REGS};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const BAR_WIDTH: u32 = 28;
const FIELD_W: usize = 34;
const ANIM_FRAMES: usize = 6;
const BRIEF_FRAMES: usize = 2;
const FRAME_DELAY: Duration = Duration::from_millis(60);

/// The heads-up display and its ship animation state.
pub struct Hud {
    pos: [usize; NUM_REGS],
    dir: [isize; NUM_REGS],
    fancy: bool,
}

impl Hud {
    /// Create a HUD. With `plain` set, color, clearing, and animation are
    /// all disabled.
    pub fn new(plain: bool) -> Self {
        let mut pos = [0; NUM_REGS];
        let mut dir = [1; NUM_REGS];
        for i in 0..NUM_REGS {
            // Staggered starting positions, alternating directions
            pos[i] = (i * 5) % FIELD_W;
            dir[i] = if i % 2 == 0 { 1 } else { -1 };
        }
        Self { pos, dir, fancy: !plain }
    }

    /// Draw one frame of the full HUD.
    pub fn render(&self, snap: &Snapshot) -> io::Result<()> {
        let mut out = io::stdout();
        if self.fancy {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        writeln!(out, "{}", self.bold("========================================"))?;
        writeln!(out, "{}", self.bold("          ARM Invaders (Sim)            "))?;
        writeln!(out, "{}", self.bold("========================================"))?;
        writeln!(out, "Turn: {}\n", snap.turns)?;

        for (i, &value) in snap.registers.iter().enumerate() {
            let exploded = if value == 0 {
                format!("  {}", self.paint("*EXPLODED*", Color::Red))
            } else {
                String::new()
            };
            writeln!(
                out,
                "r{}: {:>12}  [{}]  {}{}",
                i,
                value,
                self.bar(value),
                self.ship_line(self.pos[i]),
                exploded
            )?;
        }

        writeln!(out, "{}", self.flag_line(snap))?;
        writeln!(out, "----------------------------------------\n")?;
        writeln!(out, "Commands:")?;
        writeln!(out, "  add x k        -> r[x] = r[x] + k            (ex: add r2 10)")?;
        writeln!(out, "  sub x k        -> r[x] = r[x] - k            (ex: sub 2 5)")?;
        writeln!(out, "  mul x y        -> r[x] = r[x] * r[y]         (ex: mul r3 r1)")?;
        writeln!(out, "  mov x k        -> r[x] = k                   (ex: mov 7 0)")?;
        writeln!(out, "  rand x a b     -> r[x] = random in [a,b]     (ex: rand r0 0 500)")?;
        writeln!(out, "  save file.txt  -> save state")?;
        writeln!(out, "  load file.txt  -> load state")?;
        writeln!(out, "  script file    -> run commands from a file")?;
        writeln!(out, "  show/reset/help/quit/exit")?;
        out.flush()
    }

    /// Redraw with the full post-instruction animation.
    pub fn animate(&mut self, snap: &Snapshot) -> io::Result<()> {
        self.animate_frames(snap, ANIM_FRAMES)
    }

    /// Short redraw used after reset/load/script.
    pub fn refresh(&mut self, snap: &Snapshot) -> io::Result<()> {
        self.animate_frames(snap, BRIEF_FRAMES)
    }

    fn animate_frames(&mut self, snap: &Snapshot, frames: usize) -> io::Result<()> {
        if self.fancy {
            for _ in 0..frames {
                self.render(snap)?;
                thread::sleep(FRAME_DELAY);
                self.step_ships();
            }
        }
        self.render(snap)
    }

    /// The explosion effect for a register that just hit zero.
    pub fn explosion(&self) -> io::Result<()> {
        let art = r#"   _.-^^---....,,--
_--                  --_
<                        >
|   BOOM! Register hit!  |
\._                  _./
   ```--. . , ; .--'''
         | |   |
       .-=||  | |=-.
       `-=#$%&%$#=-'
          | ;  :|
 _____.,-#%&$@%#~,.____"#;

        let mut out = io::stdout();
        writeln!(out, "{}", self.paint(art, Color::Red))?;
        out.flush()
    }

    fn step_ships(&mut self) {
        for i in 0..NUM_REGS {
            let next = self.pos[i] as isize + self.dir[i];
            if next < 0 {
                self.pos[i] = 0;
                self.dir[i] = 1;
            } else if next as usize >= FIELD_W {
                self.pos[i] = FIELD_W - 1;
                self.dir[i] = -1;
            } else {
                self.pos[i] = next as usize;
            }
        }
    }

    fn bar(&self, value: u32) -> String {
        // The bar reads the register as a 0..=100 gauge; larger values pin it
        let v = value.min(100);
        let filled = (v * BAR_WIDTH / 100) as usize;
        let empty = BAR_WIDTH as usize - filled;

        let color = match v {
            0..=33 => Color::Red,
            34..=66 => Color::Yellow,
            _ => Color::Green,
        };

        let mut bar = self.paint(&"█".repeat(filled), color);
        bar.push_str(&self.dim(&"░".repeat(empty)));
        bar
    }

    fn ship_line(&self, pos: usize) -> String {
        let mut line = String::new();
        for i in 0..FIELD_W {
            if i == pos {
                line.push_str(&self.paint("<>", Color::Blue));
            } else {
                line.push(' ');
            }
        }
        line
    }

    fn flag_line(&self, snap: &Snapshot) -> String {
        let f = snap.flags;
        let show = |name: &str, set: bool, color: Color| {
            let text = format!("{}={}", name, u8::from(set));
            if set {
                self.paint(&text, color)
            } else {
                self.dim(&text)
            }
        };
        format!(
            "Flags: {} {} {} {}",
            show("N", f.n, Color::Red),
            show("Z", f.z, Color::Green),
            show("C", f.c, Color::Yellow),
            show("V", f.v, Color::Magenta)
        )
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.fancy {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.fancy {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.fancy {
            text.dim().to_string()
        } else {
            text.to_string()
        }
    }
}
