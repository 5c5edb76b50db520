// ABOUTME: Macros that reduce boilerplate when declaring SMPP mandatory field names
// ABOUTME: Generates the FieldName enum together with its wire names and field kinds

/// Declares the closed set of mandatory field names.
///
/// Each entry binds a variant to its SMPP wire name and to the `FieldKind`
/// that decides how the decoder reads it, so the kind of every schema entry
/// is known at compile time.
///
/// # Generated code
/// - `FieldName` enum with one variant per entry
/// - `FieldName::ALL` listing every variant in declaration order
/// - `const fn as_str` returning the wire name (e.g. `"source_addr"`)
/// - `const fn kind` returning the `FieldKind`
macro_rules! field_names {
    ($($variant:ident => ($wire:literal, $kind:ident)),+ $(,)?) => {
        /// Names of SMPP mandatory PDU fields.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum FieldName {
            $($variant),+
        }

        impl FieldName {
            pub const ALL: &'static [FieldName] = &[$(FieldName::$variant),+];

            /// The name used for this field in the SMPP v3.4 specification.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(FieldName::$variant => $wire),+
                }
            }

            /// How this field is laid out on the wire.
            pub const fn kind(self) -> $crate::datatypes::FieldKind {
                match self {
                    $(FieldName::$variant => $crate::datatypes::FieldKind::$kind),+
                }
            }
        }
    };
}
