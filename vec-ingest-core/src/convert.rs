//! Byte-to-vector conversion

use crate::error::ConversionError;

/// Size of one `f32` in bytes
pub const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Copy the native-endian `f32` values stored in `src` into `dst`.
///
/// `src` must hold exactly `dst.len() * 4` bytes. On a length mismatch `dst`
/// is left untouched. `src` may have any alignment; the copy goes through the
/// byte view of the (aligned) destination row.
pub fn copy_vector(src: &[u8], dst: &mut [f32]) -> Result<(), ConversionError> {
    let expected = dst.len() * F32_SIZE;
    if src.len() != expected {
        return Err(ConversionError {
            expected,
            actual: src.len(),
        });
    }

    bytemuck::cast_slice_mut::<f32, u8>(dst).copy_from_slice(src);
    Ok(())
}
