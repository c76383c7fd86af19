use typed_builder::TypedBuilder;

use crate::MCYCLES_PER_FRAME;

/// Construction-time options for a [`GameBoy`](crate::GameBoy).
///
/// ```
/// use pocketcore::MachineConfig;
///
/// let config = MachineConfig::builder()
///     .emulate_halt_bug(false)
///     .trace_instructions(true)
///     .build();
/// assert!(!config.emulate_halt_bug);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct MachineConfig {
    /// Reproduce the HALT bug when HALT runs with IME clear and an
    /// interrupt becomes pending during the prepare cycle.
    #[builder(default = true)]
    pub emulate_halt_bug: bool,
    /// Machine cycles between joypad polls.
    #[builder(default = MCYCLES_PER_FRAME)]
    pub joypad_poll_interval: u32,
    /// Emit a `trace` log record for every executed instruction.
    #[builder(default = false)]
    pub trace_instructions: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
