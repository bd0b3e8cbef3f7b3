use crate::decoder_buffer::DecoderBuffer;
use crate::end_data::{EndData, EndDataRecord};
use crate::header::FileHeader;
use crate::ian_file::IanFile;
use crate::layout::{
    vertices_end, END_DATA_PADDING_SIZE, END_DATA_RECORD_SIZE, FACE_INDEX_PADDING_SIZE,
    FACE_RECORD_SIZE, VERTEX_RECORD_SIZE,
};
use crate::mesh::{flip_v, Face, MeshData, Vertex};
use crate::status::{FieldContext, IanError};

/// Decoder settings.
#[derive(Debug, Clone)]
pub struct DecoderOptions {
    capture_end_data: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            capture_end_data: true,
        }
    }
}

impl DecoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the trailing end data records are scanned. On by default.
    pub fn with_end_data(mut self, capture: bool) -> Self {
        self.capture_end_data = capture;
        self
    }

    pub fn capture_end_data(&self) -> bool {
        self.capture_end_data
    }
}

/// Reads a complete .ian file: header, faces, vertices and end data.
///
/// Decoding is a single pass over the input. Nothing is returned unless
/// every record was read successfully.
#[derive(Debug, Clone, Default)]
pub struct MeshDecoder {
    options: DecoderOptions,
}

impl MeshDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn decode(&self, in_buffer: &mut DecoderBuffer) -> Result<IanFile, IanError> {
        // 1. Header
        let header = FileHeader::decode(in_buffer)?;

        // 2. Faces and vertices
        let mesh = self.decode_mesh(in_buffer, &header)?;

        // 3. End data
        let end_data = if self.options.capture_end_data {
            self.decode_end_data(in_buffer, &header)?
        } else {
            EndData::default()
        };

        Ok(IanFile {
            header,
            mesh,
            end_data,
        })
    }

    /// Reads the face and vertex tables described by a validated header.
    pub fn decode_mesh(
        &self,
        in_buffer: &mut DecoderBuffer,
        header: &FileHeader,
    ) -> Result<MeshData, IanError> {
        let faces = self.decode_faces(in_buffer, header)?;
        let vertices = self.decode_vertices(in_buffer, header)?;
        Ok(MeshData::from_parts(faces, vertices))
    }

    fn decode_faces(
        &self,
        in_buffer: &mut DecoderBuffer,
        header: &FileHeader,
    ) -> Result<Vec<Face>, IanError> {
        in_buffer
            .set_position(header.faces_offset as usize)
            .field("faces offset")?;

        // The count comes from the file; never reserve more than the buffer can hold.
        let capacity = (header.face_count as usize).min(in_buffer.remaining_size() / FACE_RECORD_SIZE);
        let mut faces = Vec::with_capacity(capacity);

        for i in 0..header.face_count {
            let unknown1 = in_buffer
                .decode_u16()
                .field_with(|| format!("face {} unknown1", i))?;
            let unknown2 = in_buffer
                .decode_u16()
                .field_with(|| format!("face {} unknown2", i))?;

            let mut stored = [0u32; 3];
            for (k, index) in stored.iter_mut().enumerate() {
                *index = in_buffer
                    .decode_u32()
                    .field_with(|| format!("face {} index {}", i, k))?;
                in_buffer
                    .advance(FACE_INDEX_PADDING_SIZE)
                    .field_with(|| format!("face {} index {} padding", i, k))?;
            }

            faces.push(Face::from_stored(unknown1, unknown2, stored));
        }

        tracing::debug!(count = faces.len(), "read faces");
        Ok(faces)
    }

    fn decode_vertices(
        &self,
        in_buffer: &mut DecoderBuffer,
        header: &FileHeader,
    ) -> Result<Vec<Vertex>, IanError> {
        in_buffer
            .set_position(header.vertices_offset as usize)
            .field("vertices offset")?;

        let capacity =
            (header.vertex_count as usize).min(in_buffer.remaining_size() / VERTEX_RECORD_SIZE);
        let mut vertices = Vec::with_capacity(capacity);

        for i in 0..header.vertex_count {
            let position = in_buffer
                .decode_vec3()
                .field_with(|| format!("vertex {} position", i))?;
            let normal = in_buffer
                .decode_vec3()
                .field_with(|| format!("vertex {} normal", i))?;
            let u = in_buffer
                .decode_f32()
                .field_with(|| format!("vertex {} u", i))?;
            let raw_v = in_buffer
                .decode_f32()
                .field_with(|| format!("vertex {} v", i))?;

            vertices.push(Vertex {
                position,
                normal,
                u,
                v: flip_v(raw_v),
            });
        }

        tracing::debug!(count = vertices.len(), "read vertices");
        Ok(vertices)
    }

    /// Scans the trailing records.
    ///
    /// The count stored in the header is not reliable, so records are read
    /// until fewer than one record's worth of bytes remain. An offset past
    /// the end of the buffer is replaced by the end of the vertex table.
    pub fn decode_end_data(
        &self,
        in_buffer: &mut DecoderBuffer,
        header: &FileHeader,
    ) -> Result<EndData, IanError> {
        let declared = header.end_data_offset as usize;
        if declared == 0 {
            return Ok(EndData::default());
        }

        let mut end_data = EndData {
            offset: Some(declared),
            ..EndData::default()
        };

        if declared > in_buffer.len() {
            let fallback = vertices_end(
                header.vertices_offset as usize,
                header.vertex_count as usize,
            );
            tracing::warn!(
                name = %header.name,
                declared,
                fallback,
                buffer_len = in_buffer.len(),
                "end data offset points past the end of the file, using end of vertex table"
            );
            end_data.offset = Some(fallback);
            end_data.offset_corrected = true;
        }

        let start = end_data.offset.unwrap_or(declared);
        if start > in_buffer.len() {
            tracing::warn!(start, "end data start is outside the file, skipping");
            return Ok(end_data);
        }
        in_buffer.set_position(start)?;

        while in_buffer.remaining_size() >= END_DATA_RECORD_SIZE {
            let i = end_data.records.len();
            let values = in_buffer
                .decode_vec3()
                .field_with(|| format!("end data {} values", i))?;
            let mut padding = [0u8; END_DATA_PADDING_SIZE];
            in_buffer
                .decode_bytes(&mut padding)
                .field_with(|| format!("end data {} padding", i))?;
            end_data.records.push(EndDataRecord { values, padding });
        }
        end_data.trailing_bytes = in_buffer.remaining_size();

        if end_data.records.len() != header.end_data_count as usize {
            tracing::debug!(
                declared = header.end_data_count,
                found = end_data.records.len(),
                "end data count differs from header"
            );
        }

        Ok(end_data)
    }
}

/// Decodes a complete .ian buffer with default options.
pub fn decode_ian(data: &[u8]) -> Result<IanFile, IanError> {
    let mut in_buffer = DecoderBuffer::new(data);
    MeshDecoder::new().decode(&mut in_buffer)
}
