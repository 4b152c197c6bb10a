/// Moves a position by a signed offset.
///
/// # Panics
///
/// If the result would be negative, which means the positions handed to the
/// caller did not belong to the documents they claimed to describe.
pub fn shift_position(pos: usize, offset: isize) -> usize {
    pos.checked_add_signed(offset)
        .unwrap_or_else(|| panic!("Position {pos} shifted by {offset} is out of range"))
}
