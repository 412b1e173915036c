//! Hexdump row formatting for address spaces.

use crate::address_space::AddressSpace;

/// Lazy iterator over formatted hexdump rows.
///
/// Produced by [`AddressSpace::dump`]. Each row covers up to `width`
/// consecutive addresses and renders as
/// `"{base:04X}: {word:04X} {word:04X} …"`, truncated at the end of the
/// dumped range. Never-written addresses render as the space's default
/// value.
///
/// ```
/// use harv16_mem::{AddressSpace, DUMP_WIDTH};
///
/// let mut mem = AddressSpace::new();
/// mem.set_write_enable(true);
/// mem.write(0x0002, 0xBEEF).unwrap();
///
/// let rows: Vec<String> = mem.dump(0, None, DUMP_WIDTH).collect();
/// assert_eq!(rows, vec!["0000: 0000 0000 BEEF".to_string()]);
/// ```
#[derive(Debug)]
pub struct Dump<'a> {
    space: &'a AddressSpace,
    cursor: u32,
    end: u32,
    width: u32,
}

impl<'a> Dump<'a> {
    pub(crate) fn new(space: &'a AddressSpace, start: u32, stop: Option<u32>, width: usize) -> Self {
        // A width of 0 would never advance; clamp to one word per row.
        let width = width.max(1) as u32;

        // An empty space dumps nothing regardless of start/stop.
        let end = match space.highest_written() {
            None => start,
            Some(high) => {
                let limit = u32::from(high) + 1;
                match stop {
                    Some(stop) => stop.min(limit),
                    None => limit,
                }
            }
        };

        Dump {
            space,
            cursor: start,
            end,
            width,
        }
    }
}

impl Iterator for Dump<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.cursor >= self.end {
            return None;
        }
        let base = self.cursor;
        let row_end = base.saturating_add(self.width).min(self.end);

        let mut row = format!("{:04X}:", base);
        for addr in base..row_end {
            row.push_str(&format!(" {:04X}", self.space.cell(addr as u16)));
        }

        self.cursor = base.saturating_add(self.width);
        Some(row)
    }
}
