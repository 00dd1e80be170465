//! TypeDescriptor - 登録された関数の入出力シェイプ

use serde::Serialize;

use super::type_ref::TypeRef;

/// How many values a function consumes and produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// No input, one output.
    Supplier,
    /// One input, one output.
    Function,
    /// One input, no output.
    Consumer,
}

impl Arity {
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Arity::Supplier)
    }

    pub fn produces_output(&self) -> bool {
        !matches!(self, Arity::Consumer)
    }
}

/// Static input/output shape of a registered function.
///
/// Built once at registration time and never mutated. `input`/`output` are
/// the payload types; the wrappers are either `Message<T>` when that side is
/// enveloped or the payload type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    arity: Arity,
    input: TypeRef,
    output: TypeRef,
    input_wrapper: TypeRef,
    output_wrapper: TypeRef,
    input_is_message: bool,
    output_is_message: bool,
}

impl TypeDescriptor {
    /// Descriptor used when nothing is known about a function.
    pub const fn unknown() -> Self {
        Self {
            arity: Arity::Function,
            input: TypeRef::unknown(),
            output: TypeRef::unknown(),
            input_wrapper: TypeRef::unknown(),
            output_wrapper: TypeRef::unknown(),
            input_is_message: false,
            output_is_message: false,
        }
    }

    pub fn builder(arity: Arity) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(arity)
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn input_type(&self) -> TypeRef {
        self.input
    }

    pub fn output_type(&self) -> TypeRef {
        self.output
    }

    pub fn input_wrapper(&self) -> TypeRef {
        self.input_wrapper
    }

    pub fn output_wrapper(&self) -> TypeRef {
        self.output_wrapper
    }

    pub fn input_is_message(&self) -> bool {
        self.input_is_message
    }

    pub fn output_is_message(&self) -> bool {
        self.output_is_message
    }

    /// True when either side of the function is enveloped.
    pub fn is_message(&self) -> bool {
        self.input_is_message || self.output_is_message
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Builder for [`TypeDescriptor`].
///
/// Sides that are never set stay `void` for the missing half of a
/// supplier/consumer and `unknown` otherwise.
///
/// # 使用例
/// ```ignore
/// let descriptor = TypeDescriptor::builder(Arity::Function)
///     .input(TypeRef::of::<Request>(), TypeRef::of::<Message<Request>>(), true)
///     .output(TypeRef::of::<String>(), TypeRef::of::<String>(), false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    fn new(arity: Arity) -> Self {
        let mut descriptor = TypeDescriptor {
            arity,
            ..TypeDescriptor::unknown()
        };
        if !arity.accepts_input() {
            descriptor.input = TypeRef::void();
            descriptor.input_wrapper = TypeRef::void();
        }
        if !arity.produces_output() {
            descriptor.output = TypeRef::void();
            descriptor.output_wrapper = TypeRef::void();
        }
        Self { descriptor }
    }

    pub fn input(mut self, payload: TypeRef, wrapper: TypeRef, is_message: bool) -> Self {
        self.descriptor.input = payload;
        self.descriptor.input_wrapper = wrapper;
        self.descriptor.input_is_message = is_message;
        self
    }

    pub fn output(mut self, payload: TypeRef, wrapper: TypeRef, is_message: bool) -> Self {
        self.descriptor.output = payload;
        self.descriptor.output_wrapper = wrapper;
        self.descriptor.output_is_message = is_message;
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}
