//! AST → class file lowering.
//!
//! Two passes over the program. The declaration pass creates every method
//! (flags, descriptor, self `Methodref`) so bodies may call functions defined
//! later in the file. The body pass then lowers statements one function at a
//! time, each with a fresh [`SymbolResolver`].

use indexmap::IndexMap;
use kafe_classfile::{AccessFlags, CONSTRUCTOR_NAME, FieldType, MethodDescriptor, OBJECT_CLASS};

use super::error::{CodegenError, FunctionError, SymbolKind};
use super::symbols::{SymbolResolver, THIS};
use super::types::{category, field_type, method_descriptor, print_param};
use crate::CompileOptions;
use crate::ast::{Call, Expr, Function, Program, Receiver, Stmt, StmtKind, Type, Visibility};
use crate::emit::{
    ClassFileAssembler, ConstantPoolBuilder, InvokeKind, MethodAssembler, MethodId, Op,
    SlotCategory,
};

pub const SYSTEM_CLASS: &str = "java/lang/System";
pub const PRINT_STREAM_CLASS: &str = "java/io/PrintStream";
pub const OUT_FIELD: &str = "out";

/// A method of the class being compiled, as seen by callers.
#[derive(Clone, Debug)]
struct Declared {
    is_static: bool,
    descriptor: MethodDescriptor,
    ret: Option<Type>,
}

pub struct CodeGenerator {
    class_name: String,
    asm: ClassFileAssembler,
    /// Declared methods keyed by their self `Methodref` index.
    declared: IndexMap<u16, Declared>,
}

impl CodeGenerator {
    /// Bootstrap the class: superclass, `System.out`, the two common
    /// `println` overloads and the default constructor.
    pub fn new(class_name: &str, options: &CompileOptions) -> Result<Self, FunctionError> {
        Self::bootstrap(class_name, options).map_err(|e| FunctionError::new(CONSTRUCTOR_NAME, e))
    }

    fn bootstrap(class_name: &str, options: &CompileOptions) -> Result<Self, CodegenError> {
        let mut asm = ClassFileAssembler::new(class_name, options)?;

        let pool = asm.pool_mut();
        pool.import_field(SYSTEM_CLASS, PRINT_STREAM_CLASS, OUT_FIELD)?;
        pool.import_method(PRINT_STREAM_CLASS, "println", "(Ljava/lang/String;)V")?;
        pool.import_method(PRINT_STREAM_CLASS, "println", "(I)V")?;

        let (ctor, _) = asm.create_method(CONSTRUCTOR_NAME, "()V", AccessFlags::PUBLIC)?;
        let super_init = asm
            .pool()
            .find_method(CONSTRUCTOR_NAME, Some(OBJECT_CLASS), Some("()V"))
            .ok_or_else(|| CodegenError::unresolved(SymbolKind::Method, CONSTRUCTOR_NAME))?;
        let method = asm.method_mut(ctor);
        method.emit(Op::Load {
            category: SlotCategory::Reference,
            slot: 0,
        })?;
        method.emit(Op::Invoke {
            kind: InvokeKind::Special,
            method: super_init,
            arg_slots: 0,
            return_slots: 0,
        })?;
        method.emit(Op::ReturnVoid)?;
        method.set_max_locals(1);

        Ok(Self {
            class_name: class_name.to_owned(),
            asm,
            declared: IndexMap::new(),
        })
    }

    /// Lower every function of `program` and hand back the finished assembler.
    pub fn generate(mut self, program: &Program) -> Result<ClassFileAssembler, FunctionError> {
        let mut ids = Vec::with_capacity(program.functions.len());
        for function in &program.functions {
            let id = self
                .declare(function)
                .map_err(|e| FunctionError::new(&function.name, e))?;
            ids.push(id);
        }

        for (function, id) in program.functions.iter().zip(ids) {
            self.lower(function, id)
                .map_err(|e| FunctionError::new(&function.name, e))?;
        }
        Ok(self.asm)
    }

    fn declare(&mut self, function: &Function) -> Result<MethodId, CodegenError> {
        let (flags, descriptor) = if function.is_entry_point() {
            (
                AccessFlags::PUBLIC | AccessFlags::STATIC,
                entry_point_descriptor(),
            )
        } else {
            let params = function.params.iter().map(|p| &p.ty);
            (access_flags(function), method_descriptor(params, function.ret.as_ref()))
        };

        let (id, method_ref) =
            self.asm
                .create_method(&function.name, &descriptor.to_string(), flags)?;
        self.declared.insert(
            method_ref,
            Declared {
                is_static: flags.is_static(),
                descriptor,
                ret: function.ret.clone(),
            },
        );
        Ok(id)
    }

    fn lower(&mut self, function: &Function, id: MethodId) -> Result<(), CodegenError> {
        let mut symbols = SymbolResolver::new(&self.class_name, function.is_static());
        if function.is_entry_point() {
            symbols.reserve_anonymous();
        }
        for param in &function.params {
            symbols.declare_local(&param.name, &param.ty)?;
        }

        let (pool, method) = self.asm.parts_mut(id);
        let mut body = BodyGen {
            class_name: &self.class_name,
            declared: &self.declared,
            pool,
            method,
            symbols,
        };
        for stmt in &function.body {
            body.stmt(stmt)?;
        }
        if !matches!(
            function.body.last(),
            Some(Stmt {
                kind: StmtKind::Return(_),
                ..
            })
        ) {
            return Err(CodegenError::MissingReturn);
        }

        let max_locals = body.symbols.max_locals();
        body.method.set_max_locals(max_locals);
        log::debug!(
            "generated {}{}: {} bytes, stack={} locals={}",
            function.name,
            body.method.descriptor(),
            body.method.code_length(),
            body.method.max_stack(),
            max_locals
        );
        Ok(())
    }
}

/// `([Ljava/lang/String;)V`
fn entry_point_descriptor() -> MethodDescriptor {
    let args = FieldType::Array(Box::new(FieldType::object("java/lang/String")));
    MethodDescriptor::new(vec![args], None)
}

fn access_flags(function: &Function) -> AccessFlags {
    let mut flags = match function.visibility {
        Visibility::Public => AccessFlags::PUBLIC,
        Visibility::Protected => AccessFlags::PROTECTED,
        Visibility::Private => AccessFlags::PRIVATE,
    };
    if function.is_static() {
        flags |= AccessFlags::STATIC;
    }
    flags
}

/// Lowering state for one function body.
struct BodyGen<'a> {
    class_name: &'a str,
    declared: &'a IndexMap<u16, Declared>,
    pool: &'a mut ConstantPoolBuilder,
    method: &'a mut MethodAssembler,
    symbols: SymbolResolver,
}

impl BodyGen<'_> {
    fn stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match &stmt.kind {
            StmtKind::VarDecl { name, ty, init } => self.var_decl(name, ty, init.as_ref()),
            StmtKind::Assign { name, value } => self.assign(name, value),
            StmtKind::Call(call) => match self.call(call)? {
                None => Ok(()),
                Some(_) => Err(CodegenError::unsupported(format!(
                    "discarding the result of `{}`",
                    call.name
                ))),
            },
            StmtKind::Return(None) => self.method.emit(Op::ReturnVoid),
            StmtKind::Return(Some(_)) => Err(CodegenError::unsupported("returning a value")),
        }
    }

    fn var_decl(&mut self, name: &str, ty: &Type, init: Option<&Expr>) -> Result<(), CodegenError> {
        if let Type::Object(class) = ty {
            if init.is_some() {
                return Err(CodegenError::unsupported(format!(
                    "initializer for object variable `{name}`"
                )));
            }
            let class_index = self.pool.import_class(class)?;
            let init_ref = self
                .pool
                .find_or_import_method(class, CONSTRUCTOR_NAME, "()V")?;
            self.method.emit(Op::New(class_index))?;
            self.method.emit(Op::Dup)?;
            self.method.emit(Op::Invoke {
                kind: InvokeKind::Special,
                method: init_ref,
                arg_slots: 0,
                return_slots: 0,
            })?;
            let slot = self.symbols.declare_object_local(name, class)?;
            return self.method.emit(Op::Store {
                category: SlotCategory::Reference,
                slot,
            });
        }

        let category = category(ty)?;
        if let Some(init) = init {
            let found = self.expr(init)?;
            check_assignable(ty, &found)?;
        }
        let slot = self.symbols.declare_local(name, ty)?;
        if init.is_some() {
            self.method.emit(Op::Store { category, slot })?;
        }
        Ok(())
    }

    fn assign(&mut self, name: &str, value: &Expr) -> Result<(), CodegenError> {
        let local = self.symbols.local(name)?.clone();
        if let Type::Object(_) = local.ty {
            return Err(CodegenError::unsupported(format!(
                "reassignment of object variable `{name}`"
            )));
        }
        let found = self.expr(value)?;
        check_assignable(&local.ty, &found)?;
        self.method.emit(Op::Store {
            category: local.category,
            slot: local.slot,
        })
    }

    /// Lower a call and return the callee's return type.
    fn call(&mut self, call: &Call) -> Result<Option<Type>, CodegenError> {
        if call.is_print() {
            self.print(call)?;
            return Ok(None);
        }

        let arg_types = call
            .args
            .iter()
            .map(|arg| self.infer(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let receiver = match &call.receiver {
            None => None,
            Some(Receiver::This) => Some(THIS),
            Some(Receiver::Variable(var)) => Some(var.as_str()),
        };
        let Some(receiver) = receiver else {
            return self.own_call(call, &arg_types, None);
        };

        let (class, slot) = self.symbols.class_of(receiver)?;
        if class == self.class_name {
            return self.own_call(call, &arg_types, Some(slot));
        }
        let class = class.to_owned();

        let descriptor = MethodDescriptor::new(arg_types.iter().map(field_type).collect(), None);
        let method_ref =
            self.pool
                .find_or_import_method(&class, &call.name, &descriptor.to_string())?;
        self.method.emit(Op::Load {
            category: SlotCategory::Reference,
            slot,
        })?;
        self.args(call)?;
        self.method.emit(Op::Invoke {
            kind: InvokeKind::Virtual,
            method: method_ref,
            arg_slots: descriptor.arg_slots(),
            return_slots: 0,
        })?;
        Ok(None)
    }

    /// Call a method of the class being compiled. `receiver` is the slot of
    /// an explicit receiver; without one, instance targets use `this`.
    fn own_call(
        &mut self,
        call: &Call,
        arg_types: &[Type],
        receiver: Option<u16>,
    ) -> Result<Option<Type>, CodegenError> {
        let (method_ref, target) = self.resolve_own(&call.name, arg_types)?;

        let kind = if target.is_static {
            if receiver.is_some() {
                return Err(CodegenError::unsupported(format!(
                    "calling static function `{}` through a receiver",
                    call.name
                )));
            }
            InvokeKind::Static
        } else {
            let slot = match receiver {
                Some(slot) => slot,
                None if self.symbols.is_static() => {
                    return Err(CodegenError::unsupported(format!(
                        "calling instance function `{}` from a static function",
                        call.name
                    )));
                }
                None => 0,
            };
            self.method.emit(Op::Load {
                category: SlotCategory::Reference,
                slot,
            })?;
            InvokeKind::Virtual
        };

        self.args(call)?;
        self.method.emit(Op::Invoke {
            kind,
            method: method_ref,
            arg_slots: target.descriptor.arg_slots(),
            return_slots: target.descriptor.return_slots(),
        })?;
        Ok(target.ret)
    }

    /// First registered method of this class named `name` whose parameters
    /// equal the argument types, else the first whose parameters accept them.
    fn resolve_own(&self, name: &str, arg_types: &[Type]) -> Result<(u16, Declared), CodegenError> {
        let args: Vec<FieldType> = arg_types.iter().map(field_type).collect();
        let candidates: Vec<(u16, &Declared)> = self
            .pool
            .methods()
            .iter()
            .filter(|row| row.name == name && row.owner == self.class_name)
            .filter_map(|row| self.declared.get(&row.index).map(|d| (row.index, d)))
            .collect();

        candidates
            .iter()
            .find(|(_, d)| d.descriptor.params == args)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|(_, d)| params_accept(&d.descriptor.params, &args))
            })
            .map(|&(index, declared)| (index, declared.clone()))
            .ok_or_else(|| CodegenError::unresolved(SymbolKind::Method, name))
    }

    fn print(&mut self, call: &Call) -> Result<(), CodegenError> {
        let field = self
            .pool
            .field(OUT_FIELD)
            .ok_or_else(|| CodegenError::unresolved(SymbolKind::Field, OUT_FIELD))?;
        let params = match (call.name.as_str(), call.args.as_slice()) {
            ("println", []) => Vec::new(),
            (_, [arg]) => vec![print_param(&self.infer(arg)?)],
            (name, []) => {
                return Err(CodegenError::unsupported(format!("`{name}` without an argument")));
            }
            (name, _) => {
                return Err(CodegenError::unsupported(format!(
                    "`{name}` with more than one argument"
                )));
            }
        };
        let descriptor = MethodDescriptor::new(params, None);
        let method_ref =
            self.pool
                .find_or_import_method(PRINT_STREAM_CLASS, &call.name, &descriptor.to_string())?;

        self.method.emit(Op::GetStatic(field))?;
        self.args(call)?;
        self.method.emit(Op::Invoke {
            kind: InvokeKind::Virtual,
            method: method_ref,
            arg_slots: descriptor.arg_slots(),
            return_slots: 0,
        })
    }

    fn args(&mut self, call: &Call) -> Result<(), CodegenError> {
        for arg in &call.args {
            self.expr(arg)?;
        }
        Ok(())
    }

    /// Emit `expr`, left operand before right, and return its type.
    fn expr(&mut self, expr: &Expr) -> Result<Type, CodegenError> {
        match expr {
            Expr::Int(value) => {
                self.method.emit(Op::PushInt(*value))?;
                Ok(Type::Int)
            }
            Expr::Str(value) => {
                let index = self.pool.intern_string_constant(value)?;
                self.method.emit(Op::PushConstant(index))?;
                Ok(Type::String)
            }
            Expr::Ident(name) => {
                let local = self.symbols.local(name)?;
                let (ty, slot, category) = (local.ty.clone(), local.slot, local.category);
                self.method.emit(Op::Load { category, slot })?;
                Ok(ty)
            }
            Expr::Binary { op, lhs, rhs } => {
                let left = self.expr(lhs)?;
                require_int(&left)?;
                let right = self.expr(rhs)?;
                require_int(&right)?;
                self.method.emit(Op::Arith(*op))?;
                Ok(Type::Int)
            }
        }
    }

    /// Type of `expr` without emitting anything.
    fn infer(&self, expr: &Expr) -> Result<Type, CodegenError> {
        match expr {
            Expr::Int(_) => Ok(Type::Int),
            Expr::Str(_) => Ok(Type::String),
            Expr::Ident(name) => Ok(self.symbols.local(name)?.ty.clone()),
            Expr::Binary { lhs, rhs, .. } => {
                require_int(&self.infer(lhs)?)?;
                require_int(&self.infer(rhs)?)?;
                Ok(Type::Int)
            }
        }
    }
}

fn require_int(ty: &Type) -> Result<(), CodegenError> {
    if ty.is_int_like() {
        Ok(())
    } else {
        Err(CodegenError::mismatch("int", ty.name()))
    }
}

fn check_assignable(target: &Type, found: &Type) -> Result<(), CodegenError> {
    if target.accepts(found) {
        Ok(())
    } else {
        Err(CodegenError::mismatch(target.name(), found.name()))
    }
}

fn is_int_field(ty: &FieldType) -> bool {
    matches!(
        ty,
        FieldType::Boolean | FieldType::Byte | FieldType::Char | FieldType::Short | FieldType::Int
    )
}

fn params_accept(params: &[FieldType], args: &[FieldType]) -> bool {
    params.len() == args.len()
        && params
            .iter()
            .zip(args)
            .all(|(p, a)| p == a || (is_int_field(p) && is_int_field(a)))
}
