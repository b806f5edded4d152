//! Shared value types for the architecture core.
//!
//! Placement strengths, timing port classes, delays, and decal graphics. These
//! are the answer types of the [`Device`](crate::Device) capability methods and
//! the tags carried by bound cells and wires.

use aion_common::Ident;
use serde::{Deserialize, Serialize};

/// An attribute as a `(key, value)` pair.
pub type Attr = (Ident, String);

/// How firmly a resource binding is held.
///
/// Placers and routers only rip up bindings weaker than the strength they
/// operate at. Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PlaceStrength {
    /// Not bound.
    #[default]
    None,
    /// Tentative binding, freely movable.
    Weak,
    /// Binding made by a heuristic that prefers not to be disturbed.
    Strong,
    /// Binding made by the placer.
    Placer,
    /// Binding fixed by a constraint.
    Fixed,
    /// Binding locked by an earlier flow stage.
    Locked,
    /// Binding requested by the user.
    User,
}

/// The timing role of a cell port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingPortClass {
    /// Clock input of a sequential cell.
    ClockInput,
    /// Output launched by a clock edge.
    RegisterOutput,
    /// Input captured by a clock edge.
    RegisterInput,
    /// Combinational input.
    CombInput,
    /// Combinational output.
    CombOutput,
    /// Output with no timing arcs into it, e.g. a constant driver.
    StartPoint,
    /// Input with no timing arcs out of it.
    EndPoint,
    /// Port excluded from timing analysis.
    Ignore,
}

/// The active edge of a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockEdge {
    /// Rising edge.
    Rising,
    /// Falling edge.
    Falling,
}

/// Clocking information for a register port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingClockingInfo {
    /// The clock port this register port is related to.
    pub clock_port: Ident,
    /// The active clock edge.
    pub edge: ClockEdge,
    /// Setup time relative to the clock edge.
    pub setup: Delay,
    /// Hold time relative to the clock edge.
    pub hold: Delay,
    /// Clock-to-output delay.
    pub clock_to_q: Delay,
}

/// A timing delay with min/typical/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    /// Minimum delay in nanoseconds (fast corner).
    pub min_ns: f64,
    /// Typical delay in nanoseconds (nominal corner).
    pub typ_ns: f64,
    /// Maximum delay in nanoseconds (slow corner).
    pub max_ns: f64,
}

impl Delay {
    /// A zero delay.
    pub const ZERO: Self = Self {
        min_ns: 0.0,
        typ_ns: 0.0,
        max_ns: 0.0,
    };

    /// Creates a new delay with the given min/typ/max values.
    pub fn new(min_ns: f64, typ_ns: f64, max_ns: f64) -> Self {
        Self {
            min_ns,
            typ_ns,
            max_ns,
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A decal placed at a position, as returned for sites, wires, pips, and groups.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecalXy {
    /// The decal to draw, or `None` when nothing is drawn.
    pub decal: Option<crate::ids::DecalId>,
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}

/// The primitive shape of a [`GraphicElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphicKind {
    /// A straight line from `(x1, y1)` to `(x2, y2)`.
    Line,
    /// A line with an arrow head at `(x2, y2)`.
    Arrow,
    /// An axis-aligned box.
    Box,
    /// A circle centered at `(x1, y1)` with radius `x2`.
    Circle,
    /// A text label at `(x1, y1)`.
    Label,
}

/// The draw style of a [`GraphicElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphicStyle {
    /// Drawn only when the owning resource is hidden.
    Hidden,
    /// Device frame decoration.
    Frame,
    /// Resource is unused.
    Inactive,
    /// Resource is bound.
    Active,
}

/// One drawing primitive of a decal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicElement {
    /// Primitive shape.
    pub kind: GraphicKind,
    /// Draw style.
    pub style: GraphicStyle,
    /// First x coordinate.
    pub x1: f32,
    /// First y coordinate.
    pub y1: f32,
    /// Second x coordinate.
    pub x2: f32,
    /// Second y coordinate.
    pub y2: f32,
    /// Label text, empty for non-label kinds.
    pub text: String,
}
