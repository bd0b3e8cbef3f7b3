use ian_core::mesh::{Face, MeshData, Vertex};
use ian_core::mesh_decoder::decode_ian;
use ian_core::mesh_encoder::encode_ian;
use ian_core::status::{IanError, FACES_OFFSET_MISMATCH, MESH_HEADER_MISMATCH};

fn encoded_triangle() -> Vec<u8> {
    let mut mesh = MeshData::new();
    mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]));
    mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]));
    mesh.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]));
    mesh.add_face(Face::new([0, 1, 2]));
    encode_ian(&mesh, "tri").unwrap()
}

fn put_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[test]
fn test_rejects_wrong_version() {
    for version in [0u32, 119, 121, 0x7800_0000] {
        let mut bytes = encoded_triangle();
        put_u32(&mut bytes, 8, version);
        let err = decode_ian(&bytes).unwrap_err();
        assert_eq!(err, IanError::InvalidVersion { found: version });
        assert_eq!(err.to_string(), "Invalid file version");
    }
}

#[test]
fn test_rejects_any_differing_mesh_header_copy() {
    // Copies 2..4, every field.
    for record in 1..4 {
        for field in 0..5 {
            let mut bytes = encoded_triangle();
            let at = 20 + record * 20 + field * 4;
            let original = u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
            put_u32(&mut bytes, at, original.wrapping_add(1));
            let err = decode_ian(&bytes).unwrap_err();
            assert_eq!(
                err,
                IanError::InvalidMeshHeader(MESH_HEADER_MISMATCH.into()),
                "record {} field {}",
                record,
                field
            );
        }
    }
}

#[test]
fn test_first_copy_change_is_detected_too() {
    let mut bytes = encoded_triangle();
    put_u32(&mut bytes, 20, 5);
    assert_eq!(
        decode_ian(&bytes).unwrap_err().to_string(),
        "Mesh header mismatch"
    );
}

#[test]
fn test_rejects_faces_offset_copy_mismatch() {
    let mut bytes = encoded_triangle();
    put_u32(&mut bytes, 112, 999);
    let err = decode_ian(&bytes).unwrap_err();
    assert_eq!(err, IanError::InvalidMeshHeader(FACES_OFFSET_MISMATCH.into()));
    assert_eq!(err.to_string(), "Faces offset mismatch");
}

#[test]
fn test_opaque_fields_are_kept() {
    let mut bytes = encoded_triangle();
    bytes[0] = 0x11;
    bytes[16] = 0x22;
    put_u32(&mut bytes, 116, 9);
    let file = decode_ian(&bytes).unwrap();
    assert_eq!(file.header.reserved_prefix[0], 0x11);
    assert_eq!(file.header.reserved[0], 0x22);
    assert_eq!(file.header.unknown_count, 9);
    assert_eq!(file.header.flags, [0x01, 0x00, 0xAF, 0xDE]);
}

#[test]
fn test_short_inputs_fail_cleanly() {
    let bytes = encoded_triangle();
    for len in [0, 7, 8, 11, 19, 99, 119, 120] {
        assert!(
            matches!(
                decode_ian(&bytes[..len]),
                Err(IanError::OutOfBounds { .. })
            ),
            "length {}",
            len
        );
    }
}
