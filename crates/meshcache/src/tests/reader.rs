#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use crate::{
        replay,
        tests::fixtures::{quad_key, recording_context, sample_mesh, Produced},
        BinaryCodec, BuildContext, CacheError, CancellationToken, Codecs, Element, Mesh, MeshCodec,
        RecordTag,
    };

    fn mesh_record(name: &str) -> Vec<u8> {
        let mut bytes = vec![RecordTag::Mesh as u8];
        MeshCodec::write(&BinaryCodec, &mut bytes, &sample_mesh(name)).unwrap();
        bytes
    }

    #[test]
    fn test_empty_stream_replays_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mesh");
        fs::write(&path, b"").unwrap();
        let (context, sink) = recording_context(quad_key("0"), "day");

        let stats = replay(&path, &context, &Codecs::default(), &CancellationToken::new()).unwrap();

        assert_eq!(stats.records(), 0);
        assert!(!stats.cancelled);
        assert!(sink.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_tag_aborts_after_valid_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mesh");
        let mut bytes = mesh_record("first");
        bytes.push(0x02);
        bytes.extend(mesh_record("never"));
        fs::write(&path, &bytes).unwrap();
        let (context, sink) = recording_context(quad_key("0"), "day");

        let err = replay(&path, &context, &Codecs::default(), &CancellationToken::new())
            .unwrap_err();

        assert!(
            matches!(&err, CacheError::CorruptCache { reason, .. } if reason.contains("0x02")),
            "unexpected error: {err}"
        );
        assert_eq!(
            *sink.lock().unwrap(),
            vec![Produced::Mesh(sample_mesh("first"))]
        );
    }

    #[test]
    fn test_truncated_element_id_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.mesh");
        fs::write(&path, [RecordTag::Element as u8, 7, 0, 0]).unwrap();
        let (context, _sink) = recording_context(quad_key("0"), "day");

        let err = replay(&path, &context, &Codecs::default(), &CancellationToken::new())
            .unwrap_err();
        assert!(err.is_corrupt());
        assert!(err.to_string().contains("truncated element id"));
    }

    #[test]
    fn test_cancel_stops_between_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three.mesh");
        let bytes: Vec<u8> = ["a", "b", "c"].iter().flat_map(|n| mesh_record(n)).collect();
        fs::write(&path, &bytes).unwrap();

        let cancel = CancellationToken::new();
        let (base, sink) = recording_context(quad_key("0"), "day");
        let stop = cancel.clone();
        let forward = base.mesh_callback.clone();
        let context = BuildContext::new(
            base.quad_key,
            base.style_provider.clone(),
            base.string_table.clone(),
            base.ele_provider.clone(),
            Arc::new(move |mesh: &Mesh| {
                forward(mesh);
                stop.cancel();
            }),
            Arc::new(|_: &Element| {}),
        );

        let stats = replay(&path, &context, &Codecs::default(), &cancel).unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.meshes, 1);
        assert_eq!(sink.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let (context, _sink) = recording_context(quad_key("0"), "day");

        let err = replay(
            &dir.path().join("nope.mesh"),
            &context,
            &Codecs::default(),
            &CancellationToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CacheError::Io(_)));
    }
}
