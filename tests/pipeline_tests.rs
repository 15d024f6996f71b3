//! Integration tests for trait pipelines and stage chains
//!
//! Test coverage areas:
//! - Byte-level no-op: identity traits reproduce the input exactly
//! - Priority ordering and target filtering across a sequence
//! - Chains mixing observers, the access stage and renaming

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use classforge_core::traits::{
    apply_class_traits, apply_class_traits_to_bytes, apply_file_traits, class_trait, file_trait,
    ImmutableTraitSequence, MutableTraitSequence, Target, TraitSequence,
};
use classforge_core::{
    Access, AccessResolver, AccessVisitor, BincodeCodec, ClassCodec, ClassModifier, TransformError,
};
use classforge_remap::Remapper;
use classforge_types::access_flags::*;
use classforge_types::{ClassHeader, ClassNode, ClassVisitor, FieldNode, MethodNode};
use pretty_assertions::assert_eq;

use common::{
    animal_hierarchy, animal_table, assert_err, assert_ok, identity_class_trait,
    identity_file_trait, shelter_class,
};

// =============================================================================
// Trait Pipeline Tests
// =============================================================================

mod trait_pipeline_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_traits_reproduce_bytes() {
        let bytes = assert_ok(BincodeCodec.write(&shelter_class()), "serialize shelter");
        let sequence: ImmutableTraitSequence<ClassNode> = [
            identity_class_trait(Target::all(3)),
            identity_class_trait(Target::default()),
            identity_class_trait(Target::direct("zoo/Shelter", 1)),
        ]
        .into_iter()
        .collect();

        let out = assert_ok(
            apply_class_traits_to_bytes(
                "zoo/Shelter",
                &bytes,
                &Remapper::identity(),
                &sequence,
                &BincodeCodec,
            ),
            "identity pipeline",
        );
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_identity_file_traits_reproduce_bytes() {
        let sequence = MutableTraitSequence::new();
        sequence.add(identity_file_trait(Target::all(5)));
        let input = b"\x00\x01binary\xffpayload".to_vec();
        let out = assert_ok(
            apply_file_traits("data.bin", input.clone(), &Remapper::identity(), &sequence),
            "identity file traits",
        );
        assert_eq!(out, input);
    }

    #[test]
    fn test_priority_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let sequence = MutableTraitSequence::new();
        for priority in [1, 10, 0, 100, i32::MAX] {
            let log = order.clone();
            sequence.add(file_trait(Target::all(priority), move |bytes, _| {
                log.lock().unwrap().push(priority);
                Ok(bytes)
            }));
        }

        assert_ok(
            apply_file_traits("any", Vec::new(), &Remapper::identity(), &sequence),
            "ordered traits",
        );
        assert_eq!(*order.lock().unwrap(), vec![i32::MAX, 100, 10, 1, 0]);
    }

    #[test]
    fn test_direct_target_only_matches_its_object() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sequence: ImmutableTraitSequence<ClassNode> =
            [class_trait(Target::direct("Foo", 0), move |class, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(class)
            })]
            .into_iter()
            .collect();
        let bytes = assert_ok(BincodeCodec.write(&ClassNode::new("Bar", None)), "serialize");

        assert_ok(
            apply_class_traits_to_bytes(
                "Bar",
                &bytes,
                &Remapper::identity(),
                &sequence,
                &BincodeCodec,
            ),
            "non-matching object",
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_ok(
            apply_class_traits_to_bytes(
                "Foo",
                &bytes,
                &Remapper::identity(),
                &sequence,
                &BincodeCodec,
            ),
            "matching object",
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_sequence_is_none() {
        let sequence = MutableTraitSequence::<ClassNode>::new();
        assert!(sequence.sequence().is_none());
    }

    #[test]
    fn test_class_traits_from_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Dog.bin");
        let dog = animal_hierarchy().remove(2);
        std::fs::write(&path, BincodeCodec.write(&dog).unwrap()).unwrap();

        let sequence = MutableTraitSequence::new();
        sequence.add(class_trait(Target::all(0), |class, remapper| {
            Ok(class.with_interface(remapper.map_class_name("zoo/Pet")))
        }));

        let out = assert_ok(
            apply_class_traits("zoo/Dog", &path, &Remapper::identity(), &sequence, &BincodeCodec),
            "trait from file",
        );
        let out = BincodeCodec.read(&out).unwrap();
        assert_eq!(out.header.interfaces, vec!["zoo/Pet".to_string()]);
    }

    #[test]
    fn test_failing_trait_names_object() {
        let sequence = MutableTraitSequence::new();
        sequence.add(file_trait(Target::all(0), |_, _| anyhow::bail!("unreadable manifest")));
        let err = assert_err(
            apply_file_traits("META-INF/MANIFEST.MF", Vec::new(), &Remapper::identity(), &sequence),
            "failing trait",
        );
        assert_eq!(err.object_name(), Some("META-INF/MANIFEST.MF"));
        common::assert_error_contains(&err, "unreadable manifest", "trait error");
    }
}

// =============================================================================
// Stage Chain Tests
// =============================================================================

mod chain_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Counts fields seen.
    #[derive(Default)]
    struct FieldCounter(usize);

    impl ClassVisitor for FieldCounter {
        fn visit(&mut self, _header: ClassHeader) {}

        fn visit_field(&mut self, _field: FieldNode) {
            self.0 += 1;
        }

        fn visit_method(&mut self, _method: MethodNode) {}

        fn visit_end(&mut self) {}
    }

    #[test]
    fn test_access_then_rename() {
        let resolver = AccessResolver::new();
        resolver.register_field("zoo/Shelter", "resident", "Lzoo/Dog;", Access::public());

        let mut counter = FieldCounter::default();
        let mut modifier = ClassModifier::new();
        modifier.set_symbol_table(animal_table());
        assert_ok(modifier.add_mapping_visitor(), "mapping request")
            .add_stage(AccessVisitor::new(&resolver));
        modifier.add_visitor(&mut counter);
        let out = assert_ok(modifier.modify(&shelter_class()), "modify shelter");

        assert_eq!(out.name(), "farm/Shelter");
        let resident = out.field("resident").unwrap();
        assert_eq!(resident.access, ACC_PUBLIC);
        assert_eq!(resident.descriptor, "Lfarm/Dog;");
        assert!(resolver.is_retired("zoo/Shelter"));
        assert_eq!(counter.0, 1);
    }

    #[test]
    fn test_modifier_errors() {
        let mut modifier = ClassModifier::new();
        assert!(matches!(
            modifier.add_mapping_visitor(),
            Err(TransformError::MissingSymbolTable)
        ));
        let err = assert_err(modifier.modify(&shelter_class()), "empty modifier");
        assert!(matches!(err, TransformError::EmptyPipeline));
    }

    #[test]
    fn test_unrelated_members_untouched() {
        let class = ClassNode::new("zoo/Keeper", Some("java/lang/Object"))
            .with_method(MethodNode::new(ACC_PUBLIC | ACC_STATIC, "feed", "(Lzoo/Animal;)V"));
        let mut modifier = ClassModifier::new();
        modifier.set_symbol_table(animal_table());
        assert_ok(modifier.add_mapping_visitor(), "mapping request");
        let out = assert_ok(modifier.modify_owned(class), "modify keeper");

        assert_eq!(out.name(), "zoo/Keeper");
        let feed = &out.methods[0];
        assert_eq!(feed.name, "feed");
        assert_eq!(feed.descriptor, "(Lfarm/Animal;)V");
        assert_eq!(feed.access, ACC_PUBLIC | ACC_STATIC);
    }
}
