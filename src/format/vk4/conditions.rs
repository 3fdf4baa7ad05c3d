//! Measurement conditions block.
//!
//! Sits directly after the offset table. Its leading u32 declares the total
//! block size; newer writers append fields beyond the documented ones, so
//! the parser reads the documented 304 bytes and skips whatever follows up
//! to the declared size.

use tracing::debug;

use crate::error::Vk4Error;
use crate::io::Cursor;

use super::MEASUREMENT_CONDITIONS_MIN_SIZE;

/// Scalar acquisition metadata.
///
/// All values are stored as little-endian u32 except the UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementConditions {
    pub size: u32,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub diff_utc_by_minutes: i32,
    pub image_attributes: u32,
    pub user_interface_mode: u32,
    pub color_composite_mode: u32,
    pub num_layer: u32,
    pub run_mode: u32,
    pub peak_mode: u32,
    pub sharpening_level: u32,
    pub speed: u32,
    pub distance: u32,
    pub pitch: u32,
    pub optical_zoom: u32,
    pub num_line: u32,
    pub line0_pos: u32,
    pub reserved1: [u32; 3],
    pub lens_mag: u32,
    pub pmt_gain_mode: u32,
    pub pmt_gain: u32,
    pub pmt_offset: u32,
    pub nd_filter: u32,
    pub reserved2: u32,
    pub persist_count: u32,
    pub shutter_speed_mode: u32,
    pub shutter_speed: u32,
    pub white_balance_mode: u32,
    pub white_balance_red: u32,
    pub white_balance_blue: u32,
    pub camera_gain: u32,
    pub plane_compensation: u32,
    pub xy_length_unit: u32,
    pub z_length_unit: u32,
    pub xy_decimal_place: u32,
    pub z_decimal_place: u32,
    pub x_length_per_pixel: u32,
    pub y_length_per_pixel: u32,
    pub z_length_per_digit: u32,
    pub reserved3: [u32; 5],
    pub light_filter_type: u32,
    pub reserved4: u32,
    pub gamma_reverse: u32,
    pub gamma: u32,
    pub gamma_offset: u32,
    pub ccd_bw_offset: u32,
    pub numerical_aperture: u32,
    pub head_type: u32,
    pub pmt_gain2: u32,
    pub omit_color_image: u32,
    pub lens_id: u32,
    pub light_lut_mode: u32,
    pub light_lut_in0: u32,
    pub light_lut_out0: u32,
    pub light_lut_in1: u32,
    pub light_lut_out1: u32,
    pub light_lut_in2: u32,
    pub light_lut_out2: u32,
    pub light_lut_in3: u32,
    pub light_lut_out3: u32,
    pub light_lut_in4: u32,
    pub light_lut_out4: u32,
    pub upper_position: u32,
    pub lower_position: u32,
    pub light_effective_bit_depth: u32,
    pub height_effective_bit_depth: u32,
}

impl MeasurementConditions {
    /// Parse the block at the cursor position and leave the cursor at its
    /// declared end.
    ///
    /// # Errors
    /// - `Truncated` if the buffer does not extend past the minimum block, or
    ///   past the declared size
    /// - `ConditionsTooSmall` if the declared size is below 304 bytes
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self, Vk4Error> {
        let start = cursor.position() as u64;
        cursor.ensure_more_than(MEASUREMENT_CONDITIONS_MIN_SIZE as u64)?;

        let size = cursor.read_u32()?;
        cursor.ensure_more_than(u64::from(size).saturating_sub(4))?;

        if size < MEASUREMENT_CONDITIONS_MIN_SIZE as u32 {
            return Err(Vk4Error::ConditionsTooSmall {
                size,
                minimum: MEASUREMENT_CONDITIONS_MIN_SIZE as u32,
            });
        }

        let conds = MeasurementConditions {
            size,
            year: cursor.read_u32()?,
            month: cursor.read_u32()?,
            day: cursor.read_u32()?,
            hour: cursor.read_u32()?,
            minute: cursor.read_u32()?,
            second: cursor.read_u32()?,
            diff_utc_by_minutes: cursor.read_i32()?,
            image_attributes: cursor.read_u32()?,
            user_interface_mode: cursor.read_u32()?,
            color_composite_mode: cursor.read_u32()?,
            num_layer: cursor.read_u32()?,
            run_mode: cursor.read_u32()?,
            peak_mode: cursor.read_u32()?,
            sharpening_level: cursor.read_u32()?,
            speed: cursor.read_u32()?,
            distance: cursor.read_u32()?,
            pitch: cursor.read_u32()?,
            optical_zoom: cursor.read_u32()?,
            num_line: cursor.read_u32()?,
            line0_pos: cursor.read_u32()?,
            reserved1: cursor.read_u32_array::<3>()?,
            lens_mag: cursor.read_u32()?,
            pmt_gain_mode: cursor.read_u32()?,
            pmt_gain: cursor.read_u32()?,
            pmt_offset: cursor.read_u32()?,
            nd_filter: cursor.read_u32()?,
            reserved2: cursor.read_u32()?,
            persist_count: cursor.read_u32()?,
            shutter_speed_mode: cursor.read_u32()?,
            shutter_speed: cursor.read_u32()?,
            white_balance_mode: cursor.read_u32()?,
            white_balance_red: cursor.read_u32()?,
            white_balance_blue: cursor.read_u32()?,
            camera_gain: cursor.read_u32()?,
            plane_compensation: cursor.read_u32()?,
            xy_length_unit: cursor.read_u32()?,
            z_length_unit: cursor.read_u32()?,
            xy_decimal_place: cursor.read_u32()?,
            z_decimal_place: cursor.read_u32()?,
            x_length_per_pixel: cursor.read_u32()?,
            y_length_per_pixel: cursor.read_u32()?,
            z_length_per_digit: cursor.read_u32()?,
            reserved3: cursor.read_u32_array::<5>()?,
            light_filter_type: cursor.read_u32()?,
            reserved4: cursor.read_u32()?,
            gamma_reverse: cursor.read_u32()?,
            gamma: cursor.read_u32()?,
            gamma_offset: cursor.read_u32()?,
            ccd_bw_offset: cursor.read_u32()?,
            numerical_aperture: cursor.read_u32()?,
            head_type: cursor.read_u32()?,
            pmt_gain2: cursor.read_u32()?,
            omit_color_image: cursor.read_u32()?,
            lens_id: cursor.read_u32()?,
            light_lut_mode: cursor.read_u32()?,
            light_lut_in0: cursor.read_u32()?,
            light_lut_out0: cursor.read_u32()?,
            light_lut_in1: cursor.read_u32()?,
            light_lut_out1: cursor.read_u32()?,
            light_lut_in2: cursor.read_u32()?,
            light_lut_out2: cursor.read_u32()?,
            light_lut_in3: cursor.read_u32()?,
            light_lut_out3: cursor.read_u32()?,
            light_lut_in4: cursor.read_u32()?,
            light_lut_out4: cursor.read_u32()?,
            upper_position: cursor.read_u32()?,
            lower_position: cursor.read_u32()?,
            light_effective_bit_depth: cursor.read_u32()?,
            height_effective_bit_depth: cursor.read_u32()?,
        };

        // Undocumented trailing fields
        cursor.seek(start + u64::from(size))?;

        debug!(
            size,
            year = conds.year,
            month = conds.month,
            day = conds.day,
            lens_mag = conds.lens_mag,
            "parsed measurement conditions"
        );

        Ok(conds)
    }
}
