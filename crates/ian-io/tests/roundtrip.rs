use std::fs;

use ian_core::mesh::{Face, MeshData, Vertex};
use ian_core::mesh_encoder::EncoderOptions;
use ian_io::{parse_obj, write_obj_string, IanReader, IanWriter, ObjReader, ObjWriter, Reader, Writer};
use tempfile::tempdir;

/// A small fan with shared vertices and non-trivial coordinates.
fn fan() -> MeshData {
    let mut mesh = MeshData::new();
    mesh.add_vertex(Vertex::new([0.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.5, 0.5]));
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::TAU / 6.0;
        mesh.add_vertex(Vertex::new(
            [angle.cos(), -1.25, angle.sin()],
            [angle.cos(), 0.0, angle.sin()],
            [0.5 + angle.cos() / 2.0, 0.5 + angle.sin() / 2.0],
        ));
    }
    for i in 1..=6u32 {
        mesh.add_face(Face::new([0, i, i % 6 + 1]));
    }
    mesh
}

#[test]
fn test_obj_text_round_trip_keeps_geometry() {
    let mesh = fan();
    let text = write_obj_string(&mesh, "fan");
    let named = parse_obj(&text).unwrap();

    assert_eq!(named.name.as_deref(), Some("fan"));
    assert_eq!(named.mesh.num_vertices(), mesh.num_vertices());
    assert_eq!(named.mesh.faces(), mesh.faces());
    assert_eq!(named.mesh.vertices(), mesh.vertices());
}

#[test]
fn test_ian_to_obj_to_ian_files() {
    let dir = tempdir().unwrap();
    let ian_path = dir.path().join("fan.ian");
    let obj_path = dir.path().join("fan.obj");
    let back_path = dir.path().join("fan_back.ian");

    let mut writer = IanWriter::new().with_options(EncoderOptions::new().with_file_id(99));
    writer.add_mesh(&fan(), Some("fan")).unwrap();
    writer.write(&ian_path).unwrap();

    let named = IanReader::open(&ian_path).unwrap().read_mesh().unwrap();
    let mut obj = ObjWriter::new();
    obj.add_mesh(&named.mesh, named.name.as_deref()).unwrap();
    obj.write(&obj_path).unwrap();

    let text = fs::read_to_string(&obj_path).unwrap();
    assert!(text.starts_with("o fan\nv 0 -0.5 0\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 6);

    let from_obj = ObjReader::open(&obj_path).unwrap().read_mesh().unwrap();
    let mut back = IanWriter::new().with_options(EncoderOptions::new().with_file_id(99));
    back.add_mesh(&from_obj.mesh, from_obj.name.as_deref()).unwrap();
    back.write(&back_path).unwrap();

    let original = IanReader::open(&ian_path).unwrap().read_file().unwrap();
    let restored = IanReader::open(&back_path).unwrap().read_file().unwrap();
    assert_eq!(restored.header, original.header);
    assert_eq!(restored.mesh.faces(), original.mesh.faces());
    for (a, b) in restored.mesh.vertices().iter().zip(original.mesh.vertices()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.normal, b.normal);
        assert_eq!(a.u, b.u);
        assert!((a.v - b.v).abs() < 1e-6);
    }
}

#[test]
fn test_generic_conversion() {
    fn convert<R: Reader, W: Writer>(mut reader: R) -> Vec<u8> {
        let named = reader.read_mesh().unwrap();
        let mut writer = W::new();
        writer.add_mesh(&named.mesh, named.name.as_deref()).unwrap();
        writer.to_bytes().unwrap()
    }

    let obj = write_obj_string(&fan(), "fan");
    let ian = convert::<ObjReader, IanWriter>(ObjReader::from_str(&obj));
    let obj_again = convert::<IanReader, ObjWriter>(IanReader::from_bytes(ian));
    let obj_again = String::from_utf8(obj_again).unwrap();

    // V goes through 1 - v twice, so only positions and faces compare exactly.
    let keep = |text: &str| -> Vec<String> {
        text.lines()
            .filter(|l| !l.starts_with("vt "))
            .map(str::to_owned)
            .collect()
    };
    assert_eq!(keep(&obj_again), keep(&obj));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = IanReader::open(dir.path().join("missing.ian")).unwrap_err();
    assert!(matches!(err, ian_io::Error::Io(_)));
}

#[test]
fn test_corrupt_file_is_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.ian");
    fs::write(&path, [0u8; 64]).unwrap();
    let err = IanReader::open(&path).unwrap().read_mesh().unwrap_err();
    assert_eq!(err.to_string(), "Invalid file version");
}
