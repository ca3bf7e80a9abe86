// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use kmp_model::{Artifact, ArtifactPool};
use tracing::{debug, info};

use crate::options::PrinterOptions;
use crate::session::RenderSession;
use crate::visited::VisitedSet;

/// Prints the metadata of artifacts in a pool as Kotlin-like declarations.
///
/// One printer serves one batch: artifacts printed inside a parent (companions, nested
/// classes, multi-file parts) are remembered so sibling scans of later entries skip them.
pub struct KotlinMetadataPrinter<'p> {
    pool: &'p ArtifactPool,
    options: PrinterOptions,
    visited: VisitedSet,
}

impl<'p> KotlinMetadataPrinter<'p> {
    pub fn new(pool: &'p ArtifactPool, options: PrinterOptions) -> Self {
        Self {
            pool,
            options,
            visited: VisitedSet::new(),
        }
    }

    /// Artifacts printed inside a parent so far.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Print `artifact` as a top-level entry. `None` when it has no metadata, when it is an
    /// embedded kind and those are excluded, or when nothing was written.
    pub fn print(&self, artifact: &'p Artifact) -> Option<String> {
        let metadata = artifact.metadata.as_ref()?;
        if self.options.exclude_embedded && metadata.kind.is_embedded() {
            debug!("Skipping embedded {} {}", metadata.kind.label(), artifact.name);
            return None;
        }
        let mut session = RenderSession::new(self.pool, &self.visited);
        let text = session.render_artifact(artifact);
        debug!("Printed {} ({} bytes)", artifact.name, text.len());
        (!text.is_empty()).then_some(text)
    }

    /// Print every artifact of the pool in name order.
    pub fn print_all(&self) -> Vec<(&'p Artifact, String)> {
        let printed: Vec<_> = self
            .pool
            .iter()
            .filter_map(|artifact| self.print(artifact).map(|text| (artifact, text)))
            .collect();
        info!(
            "Printed Kotlin metadata for {} of {} artifacts",
            printed.len(),
            self.pool.len()
        );
        printed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmp_model::flags::{
        AccessFlag, ClassFlag, ClassKind, ConstructorFlag, Modality, PropertyFlag, SyntheticFlavor,
    };
    use kmp_model::{
        AnnotationValue, BitEnum, ClassMetadata, Constructor, DeclarationContainer, Function,
        JvmAnnotation, JvmField, JvmFieldSignature, JvmMethod, JvmMethodSignature,
        KotlinAnnotation, KotlinType, Metadata, MetadataKind, MultiFileFacadeMetadata,
        MultiFilePartMetadata, Property, PropertyAccessor, SyntheticClassMetadata, TypeAlias,
        TypeParameter, ValueParameter, VersionRequirement,
    };
    use kmp_model::flags::TypeFlag;
    use pretty_assertions::assert_eq;
    use unindent::unindent;

    fn artifact(name: &str, kind: MetadataKind) -> Artifact {
        Artifact::new(name).with_metadata(Metadata::new([1, 9, 0], kind))
    }

    fn class(name: &str, build: impl FnOnce(&mut ClassMetadata)) -> Artifact {
        let mut class = ClassMetadata::new(name);
        build(&mut class);
        artifact(name, MetadataKind::Class(class))
    }

    fn pool(artifacts: Vec<Artifact>) -> ArtifactPool {
        ArtifactPool::from_artifacts(artifacts).unwrap()
    }

    fn print(pool: &ArtifactPool, name: &str) -> Option<String> {
        let printer = KotlinMetadataPrinter::new(pool, PrinterOptions::default());
        printer.print(pool.get(name).unwrap())
    }

    #[test]
    fn test_top_level_class_with_property() {
        let pool = pool(vec![class("pkg/Outer", |c| {
            c.declarations
                .properties
                .push(Property::new("x", KotlinType::class("kotlin/Int")));
        })]);
        let expected = unindent(
            "
            package pkg

            /**
            * Kotlin class (metadata version 1.9.0).
            * From Java class: pkg.Outer
            */
            class Outer {

                // Properties

                val x: Int
            }
",
        );
        assert_eq!(print(&pool, "pkg/Outer").unwrap(), expected);
    }

    #[test]
    fn test_nested_class_named_relative_to_parent() {
        let pool = pool(vec![
            class("pkg/Outer", |c| c.nested_class_names.push("Inner".to_string())),
            class("pkg/Outer$Inner", |_| {}),
        ]);
        let text = print(&pool, "pkg/Outer").unwrap();
        assert!(text.ends_with(
            "class Outer {\n\
             \n    // Nested subclasses\n\
             \n    // Kotlin class from Java class: pkg.Outer$Inner\
             \n    class Inner \n\
             \n}\n"
        ));
        assert!(!text.contains("Outer_Inner"));
    }

    #[test]
    fn test_vararg_prints_element_type() {
        let mut function = Function::new("f", KotlinType::class("kotlin/Unit"));
        function.value_parameters.push(
            ValueParameter::new(
                "xs",
                KotlinType::class("kotlin/Array")
                    .with_arguments([KotlinType::class("kotlin/String").into()]),
            )
            .vararg(KotlinType::class("kotlin/String")),
        );
        let facade = DeclarationContainer {
            functions: vec![function],
            ..Default::default()
        };
        let pool = pool(vec![artifact("pkg/UtilsKt", MetadataKind::FileFacade(facade))]);
        let expected = unindent(
            "
            package pkg

            /**
            * Kotlin file facade (metadata version 1.9.0).
            * From Java class: pkg.UtilsKt
            */

            // Functions

            fun f(vararg xs: String) { }
",
        );
        assert_eq!(print(&pool, "pkg/UtilsKt").unwrap(), expected);
    }

    #[test]
    fn test_extension_function_type_parameter() {
        let block = KotlinType::class("kotlin/Function2")
            .with_annotation(KotlinAnnotation::new("kotlin/ExtensionFunctionType"))
            .with_arguments([
                KotlinType::class("pkg/Builder").into(),
                KotlinType::class("kotlin/Int").into(),
                KotlinType::class("kotlin/Unit").into(),
            ]);
        let mut function = Function::new("build", KotlinType::class("kotlin/Unit"));
        function
            .value_parameters
            .push(ValueParameter::new("block", block));
        let facade = DeclarationContainer {
            functions: vec![function],
            ..Default::default()
        };
        let pool = pool(vec![artifact("pkg/BuildKt", MetadataKind::FileFacade(facade))]);
        let text = print(&pool, "pkg/BuildKt").unwrap();
        assert!(text.ends_with("fun build(block: Builder.(Int) -> Unit) { }\n"));
    }

    #[test]
    fn test_enum_entries_wrap_without_body() {
        let pool = pool(vec![class("pkg/Color", |c| {
            c.kind = ClassKind::EnumClass;
            c.super_types.push(
                KotlinType::class("kotlin/Enum")
                    .with_arguments([KotlinType::class("pkg/Color").into()]),
            );
            c.enum_entry_names = ["A", "B", "C", "D", "E", "F", "G"]
                .map(String::from)
                .to_vec();
        })]);
        let text = print(&pool, "pkg/Color").unwrap();
        assert!(text.ends_with("*/\nenum class Color {\n    A, B, C, D, E,\n    F, G\n}\n"));
        assert!(!text.contains(';'));
    }

    #[test]
    fn test_short_enum_with_body() {
        let pool = pool(vec![class("pkg/Dir", |c| {
            c.kind = ClassKind::EnumClass;
            c.enum_entry_names = vec!["UP".to_string(), "DOWN".to_string()];
            c.declarations.functions.push(Function::new(
                "flip",
                KotlinType::class("pkg/Dir"),
            ));
        })]);
        let text = print(&pool, "pkg/Dir").unwrap();
        assert!(text.ends_with(
            "enum class Dir {\n    UP, DOWN;\n\n    // Functions\n\n    fun flip(): Dir { }\n}\n"
        ));
    }

    #[test]
    fn test_companion_printed_once_before_nested() {
        let pool = pool(vec![
            class("pkg/Outer", |c| {
                c.companion_object_name = Some("Companion".to_string());
                c.nested_class_names = vec!["Companion".to_string()];
            }),
            class("pkg/Outer$Companion", |c| {
                c.kind = ClassKind::CompanionObject;
                c.declarations
                    .functions
                    .push(Function::new("create", KotlinType::class("pkg/Outer")));
            }),
        ]);
        let printer = KotlinMetadataPrinter::new(&pool, PrinterOptions::default());
        let text = printer.print(pool.get("pkg/Outer").unwrap()).unwrap();
        let expected = unindent(
            "
            class Outer {

                // Kotlin companion class from Java class: pkg.Outer$Companion
                companion object {

                    // Functions

                    fun create(): Outer { }
                }
            }
",
        );
        assert!(text.ends_with(&expected), "{text}");
        assert_eq!(text.matches("companion object").count(), 1);
        assert!(printer.visited().contains("pkg/Outer$Companion"));
    }

    #[test]
    fn test_property_accessor_comments() {
        let access = BitEnum::new_with(AccessFlag::Public) | AccessFlag::Final;
        let outer = class("pkg/Outer", |c| {
            let mut property = Property::new("myInt", KotlinType::class("kotlin/Int"));
            property.flags = BitEnum::new_with(PropertyFlag::Var);
            property.backing_field = Some(JvmFieldSignature::new("myInt", "I"));
            property.getter = Some(PropertyAccessor::with_signature(JvmMethodSignature::new(
                "getMyInt", "()I",
            )));
            property.setter = Some(PropertyAccessor::with_signature(JvmMethodSignature::new(
                "setMyInt", "(I)V",
            )));
            c.declarations.properties.push(property);
        })
        .with_method(JvmMethod::new(access, "getMyInt", "()I"))
        .with_method(JvmMethod::new(access, "setMyInt", "(I)V"));
        let pool = pool(vec![outer]);
        let text = print(&pool, "pkg/Outer").unwrap();
        let expected = unindent(
            "
                var myInt: Int
                    // backing field: int myInt
                    get // getter method: public final int getMyInt()
                    set() // setter method: public final void setMyInt(int)
            }
",
        );
        assert!(text.ends_with(&expected), "{text}");
    }

    #[test]
    fn test_const_property_and_default_accessor() {
        let outer = artifact(
            "pkg/ConstantsKt",
            MetadataKind::FileFacade(DeclarationContainer {
                properties: vec![{
                    let mut property = Property::new("LIMIT", KotlinType::class("kotlin/Int"));
                    property.flags =
                        BitEnum::new_with(PropertyFlag::Const) | PropertyFlag::HasConstant;
                    property.backing_field = Some(JvmFieldSignature::new("LIMIT", "I"));
                    let mut getter = PropertyAccessor::default();
                    getter.flags = BitEnum::new_with(kmp_model::flags::AccessorFlag::Default);
                    property.getter = Some(getter);
                    property
                }],
                ..Default::default()
            }),
        )
        .with_field(
            JvmField::new(BitEnum::new(), "LIMIT", "I")
                .with_constant(kmp_model::ConstantValue::Integer(10)),
        );
        let pool = pool(vec![outer]);
        let text = print(&pool, "pkg/ConstantsKt").unwrap();
        assert!(
            text.ends_with(
                "val const LIMIT: Int = 10\n    // backing field: int LIMIT\n    get // default getter\n"
            ),
            "{text}"
        );
    }

    #[test]
    fn test_generic_function_with_version_requirement() {
        let t = KotlinType::type_parameter(0);
        let non_null = KotlinType::type_parameter(0).with_flag(TypeFlag::DefinitelyNonNull);
        let mut function = Function::new("elvisLike", non_null.clone());
        function.type_parameters.push(TypeParameter::new(0, "T"));
        function.value_parameters = vec![
            ValueParameter::new("x", t.clone()),
            ValueParameter::new("y", non_null),
        ];
        function.version_requirement = Some(VersionRequirement::new(1, 7, 0));
        let facade = DeclarationContainer {
            functions: vec![function],
            ..Default::default()
        };
        let pool = pool(vec![artifact("pkg/ElvisKt", MetadataKind::FileFacade(facade))]);
        let text = print(&pool, "pkg/ElvisKt").unwrap();
        assert!(text.ends_with(
            "// Functions\n\n@SinceKotlin(\"1.7.0\")\nfun <T> elvisLike(x: T, y: T & Any): T & Any { }\n"
        ));
    }

    #[test]
    fn test_primary_and_secondary_constructors() {
        let pool = pool(vec![class("pkg/Point", |c| {
            c.flags = BitEnum::new_with(ClassFlag::Data);
            c.constructors = vec![
                Constructor::primary(vec![
                    ValueParameter::new("x", KotlinType::class("kotlin/Int")),
                    ValueParameter::new("y", KotlinType::class("kotlin/Int")),
                ]),
                Constructor::secondary(vec![]),
            ];
            let mut x = Property::new("x", KotlinType::class("kotlin/Int"));
            x.getter = Some(PropertyAccessor::with_signature(JvmMethodSignature::new(
                "getX", "()I",
            )));
            c.declarations.properties.push(x);
        })]);
        let text = print(&pool, "pkg/Point").unwrap();
        assert!(
            text.contains("data class Point(val x: Int, y: Int) {\n    // Secondary constructors\n    constructor() { }\n"),
            "{text}"
        );
    }

    #[test]
    fn test_lambda_listed_as_synthetic_inner_class() {
        let pool = pool(vec![
            class("pkg/Outer", |_| {}),
            artifact(
                "pkg/Outer$run$1",
                MetadataKind::SyntheticClass(SyntheticClassMetadata {
                    flavor: SyntheticFlavor::Lambda,
                    functions: vec![],
                }),
            ),
        ]);
        let printer = KotlinMetadataPrinter::new(&pool, PrinterOptions::default());
        let text = printer.print(pool.get("pkg/Outer").unwrap()).unwrap();
        assert!(text.ends_with(
            "class Outer {\n\
             \n    // Synthetic inner classes - these were generated by the Kotlin compiler from e.g. lambdas\n\
             \n    // Kotlin synthetic class from Java class: pkg.Outer$run$1\
             \n    /* lambda */ class run_1\n\
             }\n"
        ), "{text}");
        assert_eq!(printer.print(pool.get("pkg/Outer$run$1").unwrap()), None);
    }

    #[test]
    fn test_multi_file_facade_prints_parts() {
        let part_functions = DeclarationContainer {
            functions: vec![Function::new("helper", KotlinType::class("kotlin/Unit"))],
            ..Default::default()
        };
        let pool = pool(vec![
            artifact(
                "pkg/MultiKt",
                MetadataKind::MultiFileFacade(MultiFileFacadeMetadata {
                    part_class_names: vec![
                        "pkg/MultiKt".to_string(),
                        "pkg/MultiKt__AKt".to_string(),
                        "pkg/Missing".to_string(),
                    ],
                }),
            ),
            artifact(
                "pkg/MultiKt__AKt",
                MetadataKind::MultiFilePart(MultiFilePartMetadata {
                    facade_name: "pkg/MultiKt".to_string(),
                    declarations: part_functions,
                }),
            ),
        ]);
        let printer = KotlinMetadataPrinter::new(&pool, PrinterOptions::default());
        let printed = printer.print_all();
        assert_eq!(printed.len(), 1);
        let (facade, text) = &printed[0];
        assert_eq!(facade.name, "pkg/MultiKt");
        let expected = unindent(
            "
            package pkg

            /**
            * Kotlin multi-file class facade (metadata version 1.9.0).
            * From Java class: pkg.MultiKt
            */

                // Kotlin multi-file class part from Java class: pkg.MultiKt__AKt
                @file:JvmName(\"Multi\")
                @file:JvmMultifileClass

                // Functions

                fun helper() { }

",
        );
        assert_eq!(text, &expected);
        assert!(printer.visited().contains("pkg/MultiKt__AKt"));
    }

    #[test]
    fn test_embedded_kinds_printed_when_not_excluded() {
        let pool = pool(vec![artifact(
            "pkg/Outer$1",
            MetadataKind::SyntheticClass(SyntheticClassMetadata::default()),
        )]);
        let printer = KotlinMetadataPrinter::new(
            &pool,
            PrinterOptions {
                exclude_embedded: false,
            },
        );
        let text = printer.print(pool.get("pkg/Outer$1").unwrap()).unwrap();
        assert!(text.ends_with("*/\n/* regular */ class Outer_1\n"), "{text}");
    }

    #[test]
    fn test_no_metadata_prints_nothing() {
        let pool = pool(vec![Artifact::new("pkg/Plain")]);
        assert_eq!(print(&pool, "pkg/Plain"), None);
    }

    #[test]
    fn test_printing_is_repeatable() {
        let pool = pool(vec![
            class("pkg/Outer", |c| {
                c.companion_object_name = Some("Companion".to_string());
                c.nested_class_names = vec!["Companion".to_string(), "Inner".to_string()];
            }),
            class("pkg/Outer$Companion", |c| c.kind = ClassKind::CompanionObject),
            class("pkg/Outer$Inner", |_| {}),
            artifact(
                "pkg/Outer$Inner$1",
                MetadataKind::SyntheticClass(SyntheticClassMetadata::default()),
            ),
        ]);
        let printer = KotlinMetadataPrinter::new(&pool, PrinterOptions::default());
        let outer = pool.get("pkg/Outer").unwrap();
        let first = printer.print(outer).unwrap();
        let second = printer.print(outer).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches("pkg.Outer$Inner$1").count(), 1);
        assert_eq!(first.matches("// Kotlin companion class").count(), 1);
    }

    #[test]
    fn test_facade_name_prefix_kept_on_unrelated_class() {
        let facade = DeclarationContainer {
            functions: vec![Function::new("make", KotlinType::class("pkg/UtilsHelper"))],
            ..Default::default()
        };
        let pool = pool(vec![artifact("pkg/Utils", MetadataKind::FileFacade(facade))]);
        let text = print(&pool, "pkg/Utils").unwrap();
        assert!(text.ends_with("fun make(): UtilsHelper { }\n"), "{text}");
    }

    #[test]
    fn test_context_receivers_and_super_types() {
        let pool = pool(vec![class("pkg/Service", |c| {
            c.context_receivers = vec![
                KotlinType::class("pkg/Logger"),
                KotlinType::class("pkg/Clock"),
            ];
            c.super_types = vec![
                KotlinType::class("kotlin/Any"),
                KotlinType::class("pkg/Base"),
                KotlinType::class("pkg/Api"),
            ];
        })]);
        let expected = unindent(
            "
            package pkg

            /**
            * Kotlin class (metadata version 1.9.0).
            * From Java class: pkg.Service
            */
            context(Logger, Clock)
",
        ) + "class Service : Base, Api \n\n";
        assert_eq!(print(&pool, "pkg/Service").unwrap(), expected);
    }

    #[test]
    fn test_sealed_subclasses_listed() {
        let pool = pool(vec![class("pkg/Shape", |c| {
            c.modality = Modality::Sealed;
            c.sealed_subclass_names = vec!["pkg/Shape$Circle".to_string(), "pkg/Square".to_string()];
        })]);
        let expected = unindent(
            "
            */
            sealed class Shape {
                // Sealed subclasses: Circle, Square
            }
",
        );
        let text = print(&pool, "pkg/Shape").unwrap();
        assert!(text.ends_with(&expected), "{text}");
    }

    #[test]
    fn test_value_class_underlying_property() {
        let pool = pool(vec![class("pkg/Meters", |c| {
            c.flags = BitEnum::new_with(ClassFlag::Value);
            c.underlying_property_name = Some("value".to_string());
            c.underlying_property_type = Some(KotlinType::class("kotlin/Double"));
        })]);
        let expected = unindent(
            "
            value class Meters {
                // Underlying property name: value
                // Underlying property type: Double
            }
",
        );
        let text = print(&pool, "pkg/Meters").unwrap();
        assert!(text.ends_with(&expected), "{text}");
    }

    #[test]
    fn test_type_alias_with_block_annotation() {
        let mut alias = TypeAlias::new(
            "Handler",
            KotlinType::class("kotlin/collections/List")
                .with_arguments([KotlinType::type_parameter(0).into()]),
        );
        alias.type_parameters.push(TypeParameter::new(0, "T"));
        alias.annotations.push(
            KotlinAnnotation::new("kotlin/Deprecated")
                .with_argument("message", AnnotationValue::String("old".to_string())),
        );
        alias.version_requirement = Some(VersionRequirement::new(1, 8, 0));
        let facade = DeclarationContainer {
            type_aliases: vec![alias],
            ..Default::default()
        };
        let pool = pool(vec![artifact("pkg/AliasesKt", MetadataKind::FileFacade(facade))]);
        let expected = unindent(
            "
            */

            // Type aliases

            @Deprecated(message = \"old\")
            @SinceKotlin(\"1.8.0\")
            typealias Handler<T> = List<T>
",
        );
        let text = print(&pool, "pkg/AliasesKt").unwrap();
        assert!(text.ends_with(&expected), "{text}");
    }

    #[test]
    fn test_primary_constructor_keyword_from_version_requirement() {
        let pool = pool(vec![class("pkg/Widget", |c| {
            let mut constructor = Constructor::primary(vec![ValueParameter::new(
                "size",
                KotlinType::class("kotlin/Int"),
            )]);
            constructor.version_requirement = Some(VersionRequirement::new(1, 6, 0));
            c.constructors.push(constructor);
        })]);
        let text = print(&pool, "pkg/Widget").unwrap();
        assert!(
            text.ends_with("*/\nclass Widget @SinceKotlin(\"1.6.0\") constructor(size: Int) \n\n"),
            "{text}"
        );
    }

    #[test]
    fn test_primary_constructor_keyword_from_annotations() {
        let server = class("pkg/Server", |c| {
            let mut constructor = Constructor::primary(vec![ValueParameter::new(
                "port",
                KotlinType::class("kotlin/Int"),
            )]);
            constructor.flags = BitEnum::new_with(ConstructorFlag::HasAnnotations);
            constructor.jvm_signature = Some(JvmMethodSignature::new("<init>", "(I)V"));
            c.constructors.push(constructor);
        })
        .with_method(
            JvmMethod::new(BitEnum::new_with(AccessFlag::Public), "<init>", "(I)V")
                .with_annotation(JvmAnnotation::new("Lpkg/Inject;")),
        );
        let pool = pool(vec![server]);
        let text = print(&pool, "pkg/Server").unwrap();
        assert!(
            text.ends_with("*/\nclass Server @Inject constructor(port: Int) \n\n"),
            "{text}"
        );
    }

    #[test]
    fn test_anonymous_object_origin_in_header() {
        let pool = pool(vec![
            class("pkg/Outer", |_| {}),
            class("pkg/Outer$make$1", |c| {
                c.anonymous_object_origin_name = Some("pkg/Outer".to_string());
            }),
        ]);
        let text = print(&pool, "pkg/Outer").unwrap();
        assert!(
            text.contains(
                "\n    // Kotlin class from Java class: pkg.Outer$make$1\
                 \n    // Anonymous object origin: pkg.Outer\
                 \n    class make_1 \n"
            ),
            "{text}"
        );
    }

    #[test]
    fn test_named_companion_keeps_its_name() {
        let pool = pool(vec![
            class("pkg/Config", |c| {
                c.companion_object_name = Some("Defaults".to_string());
                c.nested_class_names = vec!["Defaults".to_string()];
            }),
            class("pkg/Config$Defaults", |c| c.kind = ClassKind::CompanionObject),
        ]);
        let text = print(&pool, "pkg/Config").unwrap();
        assert!(
            text.ends_with(
                "class Config {\n\
                 \n    // Kotlin companion class from Java class: pkg.Config$Defaults\
                 \n    companion object Defaults \n\
                 \n}\n"
            ),
            "{text}"
        );
    }
}
