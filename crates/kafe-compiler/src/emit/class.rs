//! Top-level class assembly: bootstrap pool entries, methods, serialization.

use kafe_classfile::{
    AccessFlags, CODE_ATTRIBUTE, CONSTRUCTOR_NAME, ClassFile, EncodeError, OBJECT_CLASS,
};

use super::method::MethodAssembler;
use super::pool::ConstantPoolBuilder;
use crate::CompileOptions;

/// Handle to a method owned by a [`ClassFileAssembler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MethodId(usize);

/// Owns the constant pool and every method of the class being compiled.
///
/// Construction interns, in order: the class itself, `java/lang/Object`,
/// the `"Code"` attribute name and `Object.<init>()V`.
#[derive(Debug)]
pub struct ClassFileAssembler {
    class_name: String,
    options: CompileOptions,
    pool: ConstantPoolBuilder,
    this_class: u16,
    super_class: u16,
    code_name: u16,
    methods: Vec<MethodAssembler>,
}

impl ClassFileAssembler {
    pub fn new(class_name: &str, options: &CompileOptions) -> Result<Self, EncodeError> {
        let mut pool = ConstantPoolBuilder::new();
        let this_class = pool.import_class(class_name)?;
        let super_class = pool.import_class(OBJECT_CLASS)?;
        let code_name = pool.intern_utf8(CODE_ATTRIBUTE)?;
        pool.import_method(OBJECT_CLASS, CONSTRUCTOR_NAME, "()V")?;

        Ok(Self {
            class_name: class_name.to_owned(),
            options: options.clone(),
            pool,
            this_class,
            super_class,
            code_name,
            methods: Vec::new(),
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn pool(&self) -> &ConstantPoolBuilder {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ConstantPoolBuilder {
        &mut self.pool
    }

    /// Add a method and register a self-referencing `Methodref` for it, so
    /// calls from other methods of this class resolve through the registry.
    ///
    /// Returns the method handle and the pool index of that `Methodref`.
    pub fn create_method(
        &mut self,
        name: &str,
        descriptor: &str,
        access_flags: AccessFlags,
    ) -> Result<(MethodId, u16), EncodeError> {
        let name_index = self.pool.intern_utf8(name)?;
        let descriptor_index = self.pool.intern_utf8(descriptor)?;
        let method_ref = self.pool.register_method(
            self.this_class,
            name_index,
            descriptor_index,
            &self.class_name,
            name,
            descriptor,
        )?;

        let id = MethodId(self.methods.len());
        self.methods.push(MethodAssembler::new(
            name,
            descriptor,
            access_flags,
            name_index,
            descriptor_index,
        ));
        log::debug!(
            "declared {}.{}{} ({})",
            self.class_name,
            name,
            descriptor,
            access_flags
        );
        Ok((id, method_ref))
    }

    pub fn method(&self, id: MethodId) -> &MethodAssembler {
        &self.methods[id.0]
    }

    pub fn method_mut(&mut self, id: MethodId) -> &mut MethodAssembler {
        &mut self.methods[id.0]
    }

    /// Borrow the pool and one method at the same time, for body generation.
    pub fn parts_mut(&mut self, id: MethodId) -> (&mut ConstantPoolBuilder, &mut MethodAssembler) {
        (&mut self.pool, &mut self.methods[id.0])
    }

    pub fn methods(&self) -> &[MethodAssembler] {
        &self.methods
    }

    pub fn to_class_file(&self) -> Result<ClassFile, EncodeError> {
        let mut class = ClassFile::new(self.pool.pool().clone(), self.this_class, self.super_class);
        class.major_version = self.options.major_version;
        class.minor_version = self.options.minor_version;
        class.access_flags = AccessFlags::CLASS_DEFAULT;
        for method in &self.methods {
            class.methods.push(method.finish(self.code_name)?);
        }
        Ok(class)
    }

    /// Serialize the complete class file.
    pub fn write(&self) -> Result<Vec<u8>, EncodeError> {
        let bytes = self.to_class_file()?.to_bytes()?;
        log::debug!(
            "assembled {}: {} pool entries, {} methods, {} bytes",
            self.class_name,
            self.pool.len(),
            self.methods.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
