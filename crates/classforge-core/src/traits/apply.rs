//! Running a trait sequence over one object.

use std::path::Path;

use classforge_remap::Remapper;
use classforge_types::ClassNode;
use tracing::{debug, trace};

use super::sequence::TraitSequence;
use crate::codec::ClassCodec;
use crate::error::{Result, TransformError};

/// Apply every trait of `sequence` that targets `object_name`, in order,
/// feeding each output into the next trait.
///
/// An empty sequence passes the payload through. The first failing trait
/// stops the sequence and the error names the object.
pub fn apply_traits<T, S>(
    object_name: &str,
    payload: T,
    remapper: &Remapper,
    sequence: &S,
) -> Result<T>
where
    S: TraitSequence<T> + ?Sized,
{
    let Some(traits) = sequence.sequence() else {
        return Ok(payload);
    };

    let mut payload = payload;
    let mut applied = 0usize;
    for t in traits {
        let target = t.target();
        if !target.applies_to(object_name) {
            trace!(object = object_name, priority = target.priority, "trait skipped");
            continue;
        }
        payload = t
            .modify(payload, remapper)
            .map_err(|source| TransformError::Trait {
                name: object_name.to_string(),
                source,
            })?;
        applied += 1;
    }
    debug!(object = object_name, applied, "traits applied");
    Ok(payload)
}

/// Apply file traits to the raw bytes of a resource.
pub fn apply_file_traits<S>(
    file_name: &str,
    bytes: Vec<u8>,
    remapper: &Remapper,
    sequence: &S,
) -> Result<Vec<u8>>
where
    S: TraitSequence<Vec<u8>> + ?Sized,
{
    apply_traits(file_name, bytes, remapper, sequence)
}

/// Parse class bytes, apply class traits, serialize the result.
pub fn apply_class_traits_to_bytes<S>(
    class_name: &str,
    bytes: &[u8],
    remapper: &Remapper,
    sequence: &S,
    codec: &dyn ClassCodec,
) -> Result<Vec<u8>>
where
    S: TraitSequence<ClassNode> + ?Sized,
{
    let class = codec.read(bytes).map_err(|source| TransformError::Read {
        name: class_name.to_string(),
        source,
    })?;
    let class = apply_traits(class_name, class, remapper, sequence)?;
    codec.write(&class).map_err(|source| TransformError::Write {
        name: class_name.to_string(),
        source,
    })
}

/// Like [`apply_class_traits_to_bytes`], reading the class from `source`.
pub fn apply_class_traits<S>(
    class_name: &str,
    source: &Path,
    remapper: &Remapper,
    sequence: &S,
    codec: &dyn ClassCodec,
) -> Result<Vec<u8>>
where
    S: TraitSequence<ClassNode> + ?Sized,
{
    let bytes = std::fs::read(source).map_err(|err| TransformError::Io {
        path: source.to_path_buf(),
        source: err,
    })?;
    apply_class_traits_to_bytes(class_name, &bytes, remapper, sequence, codec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BincodeCodec;
    use crate::traits::{class_trait, file_trait, ImmutableTraitSequence, MutableTraitSequence, Target};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_direct_target_filtering() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sequence: ImmutableTraitSequence<Vec<u8>> = [file_trait(Target::direct("Foo", 0), move |bytes, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(bytes)
        })]
        .into_iter()
        .collect();
        let remapper = Remapper::identity();

        apply_file_traits("Bar", vec![1], &remapper, &sequence).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        apply_file_traits("Foo", vec![1], &remapper, &sequence).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_outputs_chain_in_priority_order() {
        let sequence = MutableTraitSequence::new();
        sequence.add(file_trait(Target::all(1), |mut b, _| {
            b.push(b'1');
            Ok(b)
        }));
        sequence.add(file_trait(Target::all(2), |mut b, _| {
            b.push(b'2');
            Ok(b)
        }));
        let out = apply_file_traits("x", Vec::new(), &Remapper::identity(), &sequence).unwrap();
        assert_eq!(out, b"21");
    }

    #[test]
    fn test_empty_sequence_passes_through() {
        let sequence = MutableTraitSequence::<Vec<u8>>::new();
        let out = apply_file_traits("x", vec![9, 9], &Remapper::identity(), &sequence).unwrap();
        assert_eq!(out, vec![9, 9]);
    }

    #[test]
    fn test_failing_trait_stops_sequence() {
        let sequence = MutableTraitSequence::new();
        sequence.add(file_trait(Target::all(2), |_, _| anyhow::bail!("bad resource")));
        sequence.add(file_trait(Target::all(1), |_, _| panic!("must not run")));
        let err = apply_file_traits("res.txt", Vec::new(), &Remapper::identity(), &sequence)
            .unwrap_err();
        assert!(matches!(err, TransformError::Trait { ref name, .. } if name == "res.txt"));
    }

    #[test]
    fn test_class_traits_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("B.bin");
        let class = ClassNode::new("a/B", Some("java/lang/Object"));
        std::fs::write(&path, BincodeCodec.write(&class).unwrap()).unwrap();

        let sequence: ImmutableTraitSequence<ClassNode> = [class_trait(Target::direct("a/B", 0), |mut c, _| {
            c.header.source_file = Some("B.java".into());
            Ok(c)
        })]
        .into_iter()
        .collect();

        let bytes = apply_class_traits("a/B", &path, &Remapper::identity(), &sequence, &BincodeCodec)
            .unwrap();
        let out = BincodeCodec.read(&bytes).unwrap();
        assert_eq!(out.header.source_file.as_deref(), Some("B.java"));
    }

    #[test]
    fn test_class_read_errors_name_the_class() {
        let sequence = MutableTraitSequence::<ClassNode>::new();
        let err = apply_class_traits_to_bytes(
            "a/Broken",
            &[0xff],
            &Remapper::identity(),
            &sequence,
            &BincodeCodec,
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::Read { .. }));
        assert_eq!(err.object_name(), Some("a/Broken"));

        let missing = apply_class_traits(
            "a/Missing",
            Path::new("/nonexistent/classforge/a/Missing.bin"),
            &Remapper::identity(),
            &sequence,
            &BincodeCodec,
        )
        .unwrap_err();
        assert!(matches!(missing, TransformError::Io { .. }));
    }
}
