use bitflags::bitflags;

bitflags! {
    /// Pressed-key state sampled once per tick.
    ///
    /// The input backend sets and clears bits on key transitions; the
    /// player update only ever reads them, so holding opposing keys is
    /// representable and simply cancels out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ControlState: u8 {
        const LEFT      = 1 << 0;
        const RIGHT     = 1 << 1;
        const FORWARD   = 1 << 2;
        const BACKWARD  = 1 << 3;
        const LOOK_UP   = 1 << 4;
        const LOOK_DOWN = 1 << 5;
        const JUMP_UP   = 1 << 6;
        const JUMP_DOWN = 1 << 7;
    }
}

impl ControlState {
    /// Set or clear one flag from a key transition.
    pub fn apply(&mut self, flag: ControlState, pressed: bool) {
        self.set(flag, pressed);
    }
}
