//! Decoder integration tests.
//!
//! Tests verify:
//! - Files with no false-color image are rejected
//! - Foreign and unsupported files fail fast with a format error
//! - Image geometry, bit depth and size are validated
//! - Truncated files fail cleanly wherever they are cut
//! - Assembly and string sections degrade instead of failing

use vk4_reader::{decode, AssemblyFileType, ErrorKind, Section, Vk4Error};

use super::test_utils::{
    assembly_section, false_color_image, height_image, light_image, line_measurement_section,
    minimal_file, ramp_palette, rgb_image, slot, string_section, true_color_image, utf16_string,
    Vk4Builder,
};

/// Size of header + offset table + minimum conditions block.
const PREAMBLE_SIZE: usize = 12 + 72 + 304;

// =============================================================================
// Empty Files
// =============================================================================

#[test]
fn test_no_images_is_empty_result() {
    let data = Vk4Builder::new().trailing_bytes(1).build();
    assert_eq!(data.len(), PREAMBLE_SIZE + 1);

    let err = decode(&data).unwrap_err();
    assert_eq!(err, Vk4Error::NoImageData);
    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}

#[test]
fn test_preamble_exact_fit_is_truncated() {
    // The leading sections must be followed by at least one more byte
    let data = Vk4Builder::new().build();
    assert_eq!(data.len(), PREAMBLE_SIZE);

    let err = decode(&data).unwrap_err();
    assert!(matches!(err, Vk4Error::Truncated { .. }));
    assert_eq!(err.kind(), ErrorKind::TruncatedData);
}

#[test]
fn test_true_color_images_do_not_count() {
    let data = Vk4Builder::new()
        .color_peak(rgb_image(2, 2, [255, 0, 0]))
        .color_light(rgb_image(2, 2, [0, 255, 0]))
        .build();

    assert_eq!(decode(&data).unwrap_err(), Vk4Error::NoImageData);
}

#[test]
fn test_strings_and_line_without_images_is_empty_result() {
    let data = Vk4Builder::new()
        .line_measurement(line_measurement_section(1024))
        .strings(string_section("Title", "Lens"))
        .build();

    assert_eq!(decode(&data).unwrap_err().kind(), ErrorKind::EmptyResult);
}

// =============================================================================
// Format Errors
// =============================================================================

#[test]
fn test_foreign_magic() {
    let data = minimal_file().magic(b"XYZZ").build();

    let err = decode(&data).unwrap_err();
    assert_eq!(err, Vk4Error::InvalidMagic(*b"XYZZ"));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_foreign_magic_before_any_size_check() {
    // Too short for a header, but the magic is wrong first
    let buffers: [&[u8]; 3] = [b"XYZZ", b"TIFF1234", b"\x89PNG\r\n\x1a\n"];
    for data in buffers {
        let err = decode(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format, "buffer {:02X?}", data);
    }
}

#[test]
fn test_unsupported_file_type() {
    let data = minimal_file().file_type([1, 0, 0, 0]).build();

    let err = decode(&data).unwrap_err();
    assert_eq!(err, Vk4Error::UnsupportedFileType([1, 0, 0, 0]));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_conditions_declared_too_small() {
    let data = minimal_file().conditions_size(100).build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::ConditionsTooSmall {
            size: 100,
            minimum: 304
        }
    );
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_unknown_assembly_file_type() {
    let data = minimal_file()
        .assembly(assembly_section(7, 0, 0, &[]))
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(err, Vk4Error::InvalidAssemblyFileType(7));
    assert_eq!(err.kind(), ErrorKind::Format);
}

// =============================================================================
// Image Validation
// =============================================================================

#[test]
fn test_single_light_image() {
    let data = Vk4Builder::new()
        .light(0, false_color_image(2, 2, 8, 4, &[10, 20, 30, 40]))
        .build();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.image_count(), 1);

    let light = doc.light[0].as_ref().unwrap();
    assert_eq!(light.width, 2);
    assert_eq!(light.height, 2);
    assert_eq!(light.bit_depth, 8);
    assert_eq!(light.byte_size, 4);
    assert_eq!(&light.data[..], &[10, 20, 30, 40]);
    assert_eq!(&light.palette.table[..], &ramp_palette()[..]);
    assert_eq!(light.palette.range_max, 65535);

    assert!(doc.light[1].is_none());
    assert!(doc.light[2].is_none());
    assert!(doc.height.iter().all(Option::is_none));
    assert!(doc.color_peak.is_none());
    assert!(doc.color_light.is_none());
    assert!(doc.assembly.is_none());
    assert!(doc.line_measurement.is_none());
    assert!(doc.strings.is_none());
}

#[test]
fn test_declared_size_larger_than_geometry() {
    let data = Vk4Builder::new()
        .light(0, false_color_image(2, 2, 8, 100, &[10, 20, 30, 40]))
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::SizeMismatch {
            section: Section::Light(0),
            expected: 4,
            declared: 100
        }
    );
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);
}

#[test]
fn test_declared_size_smaller_than_geometry() {
    let data = Vk4Builder::new()
        .height(1, false_color_image(4, 4, 16, 16, &[0; 32]))
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::SizeMismatch {
            section: Section::Height(1),
            expected: 32,
            declared: 16
        }
    );
}

#[test]
fn test_true_color_size_mismatch() {
    let data = minimal_file()
        .color_peak(true_color_image(2, 2, 24, 11, &[0; 12]))
        .build();

    assert_eq!(decode(&data).unwrap_err().kind(), ErrorKind::SizeMismatch);
}

#[test]
fn test_zero_width() {
    let data = Vk4Builder::new()
        .light(0, false_color_image(0, 2, 8, 0, &[]))
        .trailing_bytes(16)
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::InvalidDimension {
            section: Section::Light(0),
            axis: "width",
            value: 0
        }
    );
    assert_eq!(err.kind(), ErrorKind::Dimension);
}

#[test]
fn test_oversized_height() {
    let data = Vk4Builder::new()
        .height(0, false_color_image(1, 65537, 8, 65537, &[]))
        .trailing_bytes(16)
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::InvalidDimension {
            section: Section::Height(0),
            axis: "height",
            value: 65537
        }
    );
}

#[test]
fn test_maximum_dimension_accepted() {
    let data = Vk4Builder::new()
        .light(0, light_image(65536, 1))
        .build();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.light[0].as_ref().unwrap().width, 65536);
}

#[test]
fn test_false_color_rejects_24_bit() {
    let data = Vk4Builder::new()
        .light(2, false_color_image(1, 1, 24, 3, &[1, 2, 3]))
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::UnsupportedBitDepth {
            section: Section::Light(2),
            bit_depth: 24
        }
    );
    assert_eq!(err.kind(), ErrorKind::BitDepth);
}

#[test]
fn test_true_color_rejects_8_bit() {
    let data = minimal_file()
        .color_light(true_color_image(2, 2, 8, 4, &[0; 4]))
        .build();

    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        Vk4Error::UnsupportedBitDepth {
            section: Section::ColorLight,
            bit_depth: 8
        }
    );
}

#[test]
fn test_all_channels() {
    let data = Vk4Builder::new()
        .light(0, light_image(3, 2))
        .light(1, light_image(3, 2))
        .light(2, false_color_image(3, 2, 16, 12, &[7; 12]))
        .height(0, height_image(3, 2))
        .height(1, height_image(3, 2))
        .height(2, height_image(3, 2))
        .color_peak(rgb_image(3, 2, [1, 2, 3]))
        .color_light(rgb_image(3, 2, [4, 5, 6]))
        .build();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.image_count(), 6);

    let sections: Vec<Section> = doc.false_color_images().map(|(s, _)| s).collect();
    assert_eq!(
        sections,
        vec![
            Section::Light(0),
            Section::Light(1),
            Section::Light(2),
            Section::Height(0),
            Section::Height(1),
            Section::Height(2),
        ]
    );
    assert_eq!(doc.true_color_images().count(), 2);

    let height = doc.height[0].as_ref().unwrap();
    assert_eq!(height.bytes_per_sample(), 4);
    assert_eq!(&height.data[4..8], &100u32.to_le_bytes());

    let peak = doc.color_peak.as_ref().unwrap();
    assert_eq!(peak.bytes_per_sample(), 3);
    assert_eq!(&peak.data[..3], &[1, 2, 3]);
}

#[test]
fn test_height_only_file() {
    let data = Vk4Builder::new().height(2, height_image(2, 2)).build();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.image_count(), 1);
    assert!(doc.light.iter().all(Option::is_none));
}

#[test]
fn test_error_in_later_section_aborts_decode() {
    let data = minimal_file()
        .color_peak(true_color_image(2, 2, 32, 16, &[0; 16]))
        .build();

    assert_eq!(decode(&data).unwrap_err().kind(), ErrorKind::BitDepth);
}

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn test_every_prefix_is_truncated() {
    let data = minimal_file().build();
    assert!(decode(&data).is_ok());

    let cuts = (0..data.len()).step_by(7).chain([data.len() - 1]);
    for len in cuts {
        let err = decode(&data[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData, "prefix of {} bytes", len);
    }
}

#[test]
fn test_offset_past_end_of_file() {
    let data = minimal_file().offset(slot::LIGHT[1], 0x7FFF_FFFF).build();

    let err = decode(&data).unwrap_err();
    assert!(matches!(
        err,
        Vk4Error::SectionOutOfBounds {
            section: Section::Light(1),
            offset: 0x7FFF_FFFF,
            required: 796,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::TruncatedData);
}

#[test]
fn test_payload_cut_short() {
    let mut data = Vk4Builder::new().light(0, light_image(4, 4)).build();
    data.truncate(data.len() - 5);

    let err = decode(&data).unwrap_err();
    assert!(matches!(err, Vk4Error::Truncated { requested: 16, .. }));
}

#[test]
fn test_conditions_size_past_end() {
    let mut data = minimal_file().build();
    data[84..88].copy_from_slice(&1_000_000u32.to_le_bytes());

    let err = decode(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedData);
}

#[test]
fn test_line_measurement_cut_short() {
    let mut line = line_measurement_section(1024);
    line.truncate(1000);
    let data = minimal_file().line_measurement(line).build();

    let err = decode(&data).unwrap_err();
    assert!(matches!(
        err,
        Vk4Error::SectionOutOfBounds {
            section: Section::LineMeasurement,
            ..
        }
    ));
}

// =============================================================================
// Measurement Conditions
// =============================================================================

#[test]
fn test_conditions_fields() {
    let doc = decode(&minimal_file().build()).unwrap();

    let c = &doc.conditions;
    assert_eq!(c.size, 304);
    assert_eq!((c.year, c.month, c.day), (2023, 6, 14));
    assert_eq!((c.hour, c.minute, c.second), (9, 30, 15));
    assert_eq!(c.diff_utc_by_minutes, -300);
    assert_eq!(c.lens_mag, 50);
    assert_eq!(c.x_length_per_pixel, 276_000);
    assert_eq!(c.z_length_per_digit, 1);
}

#[test]
fn test_conditions_trailing_fields_are_skipped() {
    let data = minimal_file().conditions_size(400).build();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.conditions.size, 400);
    assert_eq!(doc.light[0].as_ref().unwrap().byte_size, 4);
}

// =============================================================================
// Assembly
// =============================================================================

#[test]
fn test_assembly_files() {
    let data = minimal_file()
        .assembly(assembly_section(2, 2, 1, &["tile_a.vk4", "tile_b.vk4"]))
        .build();

    let doc = decode(&data).unwrap();
    let assembly = doc.assembly.unwrap();
    assert_eq!(assembly.info.file_type, AssemblyFileType::AssemblyFileUnicode);
    assert_eq!(assembly.info.size, 24 + 2 * 532);
    assert_eq!(assembly.conditions.count_x, 2);
    assert_eq!(assembly.conditions.count_y, 1);
    assert_eq!(assembly.files.len(), 2);

    let expected: Vec<u16> = "tile_b.vk4".encode_utf16().collect();
    assert_eq!(&assembly.files[1].source_file[..expected.len()], &expected[..]);
    assert_eq!(assembly.files[1].source_file[expected.len()], 0);
    assert_eq!(assembly.files[1].pos_x, 1);
    assert_eq!(assembly.files[1].distance_x, 1000);
}

#[test]
fn test_assembly_counts_exceeding_buffer_yield_no_files() {
    // Declares 3 x 3 tiles but carries a single record
    let data = minimal_file()
        .assembly(assembly_section(1, 3, 3, &["only.vk4"]))
        .build();

    let doc = decode(&data).unwrap();
    let assembly = doc.assembly.unwrap();
    assert!(assembly.files.is_empty());
    assert_eq!(assembly.conditions.count_x, 0);
    assert_eq!(assembly.conditions.count_y, 0);
    assert_eq!(assembly.info.file_type, AssemblyFileType::AssemblyFile);
}

#[test]
fn test_assembly_without_tiles() {
    let data = minimal_file()
        .assembly(assembly_section(0, 0, 0, &[]))
        .build();

    let doc = decode(&data).unwrap();
    let assembly = doc.assembly.unwrap();
    assert_eq!(assembly.info.file_type, AssemblyFileType::Normal);
    assert!(assembly.files.is_empty());
}

// =============================================================================
// Line Measurement
// =============================================================================

#[test]
fn test_line_measurement() {
    let data = minimal_file()
        .line_measurement(line_measurement_section(512))
        .build();

    let doc = decode(&data).unwrap();
    let line = doc.line_measurement.unwrap();
    assert_eq!(line.size, 18440);
    assert_eq!(line.line_width, 512);

    let light = line.light_profile();
    assert_eq!(light.len(), 1024);
    assert_eq!(light[1023], 1023);

    let height = line.height_profile();
    assert_eq!(height[10], 100);
    assert!(line.light[1].iter().all(|&b| b == 0));
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn test_strings() {
    let data = minimal_file()
        .strings(string_section("Wafer edge", "Plan Apo 150x"))
        .build();

    let doc = decode(&data).unwrap();
    let strings = doc.strings.unwrap();
    assert_eq!(strings.title, "Wafer edge");
    assert_eq!(strings.lens_name, "Plan Apo 150x");
}

#[test]
fn test_strings_with_three_bytes_left() {
    let data = minimal_file().strings(vec![0xAA, 0xBB, 0xCC]).build();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.image_count(), 1);
    let strings = doc.strings.unwrap();
    assert_eq!(strings.title, "");
    assert_eq!(strings.lens_name, "");
}

#[test]
fn test_strings_declared_length_too_long() {
    let mut section = (500u32).to_le_bytes().to_vec();
    section.extend_from_slice(&utf16_string("Lens"));
    let data = minimal_file().strings(section).build();

    let strings = decode(&data).unwrap().strings.unwrap();
    assert_eq!(strings.title, "");
    assert_eq!(strings.lens_name, "Lens");
}

#[test]
fn test_strings_offset_past_end() {
    let data = minimal_file().build();
    let len = data.len() as u32;
    let data = minimal_file().offset(slot::STRING_DATA, len + 1).build();

    let err = decode(&data).unwrap_err();
    assert!(matches!(
        err,
        Vk4Error::SectionOutOfBounds {
            section: Section::StringData,
            ..
        }
    ));
}

#[test]
fn test_strings_offset_at_end() {
    let data = minimal_file().build();
    let len = data.len() as u32;
    let data = minimal_file().offset(slot::STRING_DATA, len).build();

    let strings = decode(&data).unwrap().strings.unwrap();
    assert!(strings.title.is_empty());
    assert!(strings.lens_name.is_empty());
}

// =============================================================================
// Header
// =============================================================================

#[test]
fn test_header_and_offset_table() {
    let data = minimal_file()
        .strings(string_section("t", "l"))
        .build();

    let doc = decode(&data).unwrap();
    assert_eq!(&doc.header.magic, b"VK4_");
    assert_eq!(doc.header.dll_version_number(), 0x0100_0003);
    assert_eq!(doc.offset_table.light[0], 388);
    assert_eq!(doc.offset_table.string_data, 388 + 796 + 4);
    assert!(doc.offset_table.has_false_color_images());
}
