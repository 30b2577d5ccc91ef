//! Text frames exchanged with the simulation.
//!
//! Inbound (one per tick), sections separated by `;`, fields by `,`:
//!
//! ```text
//! time_total,time_since_event,lookahead
//! ; x,y,z,rot_x,rot_y,rot_z,shots,reloads,dryfires,hits,focus_id,fx,fy,fz,pupil_r,pupil_l
//! ; x,y,z,visible,state, x,y,z,visible,state, ...
//! ; open door flags
//! ; closed door flags
//! [; robot section]
//! ```
//!
//! Outbound: `tick_time;x0,x1,..;y0,y1,..;z0,z1,..` in the world frame.

use std::fmt;
use std::str::FromStr;

use crate::error::FrameError;
use crate::pipeline::coords::WorldPoint;
use crate::pipeline::entities::Npc;
use crate::pipeline::params::MAX_LOOKAHEAD;

const TIMING_FIELDS: usize = 3;
const PLAYER_FIELDS: usize = 16;
const NPC_FIELDS: usize = 5;
const ROBOT_FIELDS: usize = 8;

/// First section: clocks and the requested look-ahead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timing {
    pub total: f64,
    /// Time since the triggering event; raw frames are only dumped once positive
    pub since_event: f64,
    /// Look-ahead in ticks
    pub lookahead: usize,
}

/// Second section: shooter pose, weapon counters and gaze.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub position: WorldPoint,
    pub rotation: [f64; 3],
    pub shots_fired: u32,
    pub reloads: u32,
    pub dry_fires: u32,
    pub hits: u32,
    pub focus_object: String,
    pub focus: [f64; 3],
    pub pupil_right: f64,
    pub pupil_left: f64,
}

/// Optional trailing section describing the two robots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RobotState {
    /// Whether each robot currently sees the shooter
    pub sees_shooter: [bool; 2],
    pub positions: [WorldPoint; 2],
}

/// A fully parsed inbound frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InboundFrame {
    pub timing: Timing,
    pub player: PlayerState,
    pub npcs: Vec<Npc>,
    pub open_doors: Vec<bool>,
    pub closed_doors: Vec<bool>,
    pub robots: Option<RobotState>,
}

fn fields(section: &str) -> Vec<&str> {
    section
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

fn expect_fields(name: &'static str, found: usize, expected: usize) -> Result<(), FrameError> {
    if found == expected {
        Ok(())
    } else {
        Err(FrameError::FieldCount {
            section: name,
            expected,
            found,
        })
    }
}

fn number(section: &'static str, value: &str) -> Result<f64, FrameError> {
    value.parse().map_err(|_| FrameError::InvalidNumber {
        section,
        value: value.to_string(),
    })
}

fn counter(section: &'static str, value: &str) -> Result<u32, FrameError> {
    value.parse().map_err(|_| FrameError::InvalidNumber {
        section,
        value: value.to_string(),
    })
}

fn flag(section: &'static str, value: &str) -> Result<bool, FrameError> {
    number(section, value).map(|v| v != 0.0)
}

fn point(section: &'static str, xyz: &[&str]) -> Result<WorldPoint, FrameError> {
    Ok(WorldPoint::new(
        number(section, xyz[0])?,
        number(section, xyz[1])?,
        number(section, xyz[2])?,
    ))
}

fn triple(section: &'static str, xyz: &[&str]) -> Result<[f64; 3], FrameError> {
    let p = point(section, xyz)?;
    Ok([p.x, p.y, p.z])
}

impl FromStr for Timing {
    type Err = FrameError;

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn from_str(section: &str) -> Result<Self, Self::Err> {
        const NAME: &str = "timing";
        let f = fields(section);
        expect_fields(NAME, f.len(), TIMING_FIELDS)?;

        let lookahead = number(NAME, f[2])?;
        if !lookahead.is_finite() || lookahead < 0.0 || lookahead > MAX_LOOKAHEAD as f64 {
            return Err(FrameError::Lookahead(lookahead));
        }
        Ok(Self {
            total: number(NAME, f[0])?,
            since_event: number(NAME, f[1])?,
            lookahead: lookahead as usize,
        })
    }
}

impl FromStr for PlayerState {
    type Err = FrameError;

    fn from_str(section: &str) -> Result<Self, Self::Err> {
        const NAME: &str = "player";
        let f = fields(section);
        expect_fields(NAME, f.len(), PLAYER_FIELDS)?;

        Ok(Self {
            position: point(NAME, &f[0..3])?,
            rotation: triple(NAME, &f[3..6])?,
            shots_fired: counter(NAME, f[6])?,
            reloads: counter(NAME, f[7])?,
            dry_fires: counter(NAME, f[8])?,
            hits: counter(NAME, f[9])?,
            focus_object: f[10].to_string(),
            focus: triple(NAME, &f[11..14])?,
            pupil_right: number(NAME, f[14])?,
            pupil_left: number(NAME, f[15])?,
        })
    }
}

impl FromStr for RobotState {
    type Err = FrameError;

    fn from_str(section: &str) -> Result<Self, Self::Err> {
        const NAME: &str = "robots";
        let f = fields(section);
        expect_fields(NAME, f.len(), ROBOT_FIELDS)?;

        Ok(Self {
            sees_shooter: [flag(NAME, f[0])?, flag(NAME, f[1])?],
            positions: [point(NAME, &f[2..5])?, point(NAME, &f[5..8])?],
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_npcs(section: &str) -> Result<Vec<Npc>, FrameError> {
    const NAME: &str = "npcs";
    let f = fields(section);
    if f.len() % NPC_FIELDS != 0 {
        return Err(FrameError::NpcGroup {
            found: f.len(),
            group: NPC_FIELDS,
        });
    }
    f.chunks_exact(NPC_FIELDS)
        .map(|group| {
            Ok(Npc {
                position: point(NAME, &group[0..3])?,
                visible: flag(NAME, group[3])?,
                state: number(NAME, group[4])? as i32,
            })
        })
        .collect()
}

fn parse_flags(name: &'static str, section: &str) -> Result<Vec<bool>, FrameError> {
    fields(section).into_iter().map(|v| flag(name, v)).collect()
}

impl FromStr for InboundFrame {
    type Err = FrameError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let sections: Vec<&str> = text.trim().split(';').collect();
        if !(5..=6).contains(&sections.len()) {
            return Err(FrameError::SectionCount {
                expected: 5,
                found: sections.len(),
            });
        }

        let robots = match sections.get(5).map(|s| s.trim()) {
            None | Some("") => None,
            Some(section) => Some(section.parse::<RobotState>()?),
        };

        Ok(Self {
            timing: sections[0].parse::<Timing>()?,
            player: sections[1].parse::<PlayerState>()?,
            npcs: parse_npcs(sections[2])?,
            open_doors: parse_flags("open doors", sections[3])?,
            closed_doors: parse_flags("closed doors", sections[4])?,
            robots,
        })
    }
}

/// A forecast ready to send back to the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutboundFrame {
    pub tick_time: f64,
    pub points: Vec<WorldPoint>,
}

/// Formats like the simulation expects: shortest round-trip digits with a
/// decimal point, `nan`/`inf`/`-inf`, and a signed two-digit exponent such
/// as `1e+16` or `1.5e-05` outside `[1e-4, 1e16)`.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }
        let repr = format!("{v:?}");
        match repr.split_once('e') {
            None => f.write_str(&repr),
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                write!(f, "{mantissa}e{sign}{digits:0>2}")
            }
        }
    }
}

fn write_axis(
    f: &mut fmt::Formatter<'_>,
    points: &[WorldPoint],
    axis: fn(&WorldPoint) -> f64,
) -> fmt::Result {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", Num(axis(p)))?;
    }
    Ok(())
}

impl fmt::Display for OutboundFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", Num(self.tick_time))?;
        write_axis(f, &self.points, |p| p.x)?;
        f.write_str(";")?;
        write_axis(f, &self.points, |p| p.y)?;
        f.write_str(";")?;
        write_axis(f, &self.points, |p| p.z)
    }
}

impl FromStr for OutboundFrame {
    type Err = FrameError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        const NAME: &str = "forecast";
        let sections: Vec<&str> = text.trim().split(';').collect();
        if sections.len() != 4 {
            return Err(FrameError::SectionCount {
                expected: 4,
                found: sections.len(),
            });
        }

        let axis = |s: &str| -> Result<Vec<f64>, FrameError> {
            fields(s).into_iter().map(|v| number(NAME, v)).collect()
        };
        let xs = axis(sections[1])?;
        let ys = axis(sections[2])?;
        let zs = axis(sections[3])?;
        expect_fields(NAME, ys.len(), xs.len())?;
        expect_fields(NAME, zs.len(), xs.len())?;

        Ok(Self {
            tick_time: number(NAME, sections[0].trim())?,
            points: xs
                .into_iter()
                .zip(ys)
                .zip(zs)
                .map(|((x, y), z)| WorldPoint::new(x, y, z))
                .collect(),
        })
    }
}
