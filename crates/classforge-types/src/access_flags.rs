//! Access flag and handle-kind constants from the class-file format.
//!
//! Values match the `access_flags` and `reference_kind` tables of the JVM
//! class-file specification, so flags read by an external class reader can be
//! used here without translation.

/// Public access: class, field, method.
pub const ACC_PUBLIC: u32 = 0x0001;
/// Private access: field, method, nested class.
pub const ACC_PRIVATE: u32 = 0x0002;
/// Protected access: field, method, nested class.
pub const ACC_PROTECTED: u32 = 0x0004;
/// Static: field, method.
pub const ACC_STATIC: u32 = 0x0008;
/// Final: class, field, method.
pub const ACC_FINAL: u32 = 0x0010;
/// Super (class) / synchronized (method).
pub const ACC_SUPER: u32 = 0x0020;
/// Synchronized method (same bit as ACC_SUPER).
pub const ACC_SYNCHRONIZED: u32 = 0x0020;
/// Volatile field.
pub const ACC_VOLATILE: u32 = 0x0040;
/// Bridge method (same bit as ACC_VOLATILE).
pub const ACC_BRIDGE: u32 = 0x0040;
/// Transient field.
pub const ACC_TRANSIENT: u32 = 0x0080;
/// Varargs method (same bit as ACC_TRANSIENT).
pub const ACC_VARARGS: u32 = 0x0080;
/// Native method.
pub const ACC_NATIVE: u32 = 0x0100;
/// Interface: class.
pub const ACC_INTERFACE: u32 = 0x0200;
/// Abstract: class, method.
pub const ACC_ABSTRACT: u32 = 0x0400;
/// Strict floating point: method.
pub const ACC_STRICT: u32 = 0x0800;
/// Synthetic: class, field, method.
pub const ACC_SYNTHETIC: u32 = 0x1000;
/// Annotation type: class.
pub const ACC_ANNOTATION: u32 = 0x2000;
/// Enum: class, field.
pub const ACC_ENUM: u32 = 0x4000;
/// Module: class.
pub const ACC_MODULE: u32 = 0x8000;

/// Mask of the three visibility bits.
pub const VISIBILITY_MASK: u32 = ACC_PUBLIC | ACC_PROTECTED | ACC_PRIVATE;

// Method handle reference kinds.
pub const H_GETFIELD: u8 = 1;
pub const H_GETSTATIC: u8 = 2;
pub const H_PUTFIELD: u8 = 3;
pub const H_PUTSTATIC: u8 = 4;
pub const H_INVOKEVIRTUAL: u8 = 5;
pub const H_INVOKESTATIC: u8 = 6;
pub const H_INVOKESPECIAL: u8 = 7;
pub const H_NEWINVOKESPECIAL: u8 = 8;
pub const H_INVOKEINTERFACE: u8 = 9;

/// Returns true if `access` carries the private bit.
pub fn is_private(access: u32) -> bool {
    access & ACC_PRIVATE != 0
}

/// Returns true if `access` carries the final bit.
pub fn is_final(access: u32) -> bool {
    access & ACC_FINAL != 0
}
