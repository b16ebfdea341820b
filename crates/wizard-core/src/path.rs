//! Acceso por rutas dinámicas ("dot/bracket paths") sobre `serde_json::Value`.
//!
//! Una ruta es una cadena con `.` para claves de objeto y `[n]` para índices
//! de lista (`"user.addresses[0].city"`). Ambas formas se normalizan a una
//! lista ordenada de segmentos.
//!
//! Principios:
//! - `get_path` nunca falla: el recorrido se corta y devuelve `None` en el
//!   momento en que un segmento intermedio está ausente o es `null`.
//! - `set_path` devuelve una raíz NUEVA y jamás muta su entrada. Los
//!   contenedores intermedios ausentes se sintetizan: una lista si el
//!   siguiente segmento es puramente numérico, un mapa en caso contrario.
//! - Las rutas mal formadas (corchetes sin cerrar, etc.) degradan a un
//!   troceo best-effort de segmentos; no existe variante de error.

use serde_json::{Map, Value};

/// Un segmento ya normalizado de una ruta.
///
/// Los segmentos puramente numéricos se normalizan a `Index` sin importar si
/// venían en forma `[n]` o `.n`; al aplicarlos contra un objeto se coercen de
/// vuelta a clave string (`"0"`), y contra una lista actúan como índice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn from_raw(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            // Dígitos puros: candidato a índice de lista
            match raw.parse::<usize>() {
                Ok(n) => PathSegment::Index(n),
                Err(_) => PathSegment::Key(raw.to_string()),
            }
        } else {
            PathSegment::Key(raw.to_string())
        }
    }

    /// Representación como clave de objeto (coerción numérica -> string).
    pub fn key_string(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(n) => n.to_string(),
        }
    }

    /// Índice de lista si el segmento lo permite.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(n) => Some(*n),
            PathSegment::Key(k) => k.parse::<usize>().ok(),
        }
    }
}

/// Trocea una ruta en segmentos normalizados.
///
/// Acepta `a.b[2].c`, `a.b.2.c` y mezclas. Un corchete sin cerrar consume
/// hasta el final de la cadena (best-effort, decisión explícita de diseño).
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::from_raw(&current));
                    current.clear();
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::from_raw(&current));
                    current.clear();
                }
                let mut inner = String::new();
                let mut closed = false;
                for ic in chars.by_ref() {
                    if ic == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(ic);
                }
                let _ = closed; // sin cierre: tratamos lo consumido igual
                if !inner.is_empty() {
                    segments.push(PathSegment::from_raw(&inner));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(PathSegment::from_raw(&current));
    }
    segments
}

/// Lee el valor en `path` dentro de `root`.
///
/// Ruta vacía devuelve la raíz tal cual. Devuelve `None` en cuanto un
/// segmento está ausente o resuelve a `null`.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    let mut current = root;
    for segment in parse_path(path) {
        let next = match current {
            Value::Object(map) => map.get(&segment.key_string()),
            Value::Array(items) => segment.as_index().and_then(|i| items.get(i)),
            _ => None,
        }?;
        if next.is_null() {
            return None;
        }
        current = next;
    }
    Some(current)
}

/// Variante con default: clona el valor encontrado o devuelve `default`.
pub fn get_path_or(root: &Value, path: &str, default: Value) -> Value {
    get_path(root, path).cloned().unwrap_or(default)
}

/// Escribe `value` en `path` y devuelve una raíz NUEVA (copy-on-write).
///
/// La entrada `root` queda intacta. Ruta vacía reemplaza la raíz completa.
/// Escribir en un índice más allá del final de una lista rellena con `null`.
pub fn set_path(root: &Value, path: &str, value: Value) -> Value {
    if path.is_empty() {
        return value;
    }
    let mut new_root = root.clone();
    let mut slot: &mut Value = &mut new_root;
    for segment in &parse_path(path) {
        slot = descend(slot, segment);
    }
    *slot = value;
    new_root
}

/// Obtiene el slot mutable para `segment`, sintetizando el contenedor si el
/// existente falta o no encaja con el tipo del segmento.
fn descend<'a>(slot: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    match segment {
        PathSegment::Index(n) => {
            // Mapa existente: clave numérica coercida a string. En cualquier
            // otro caso no-lista se sintetiza una lista.
            if !matches!(slot, Value::Object(_) | Value::Array(_)) {
                *slot = Value::Array(Vec::new());
            }
            match slot {
                Value::Object(map) => map.entry(n.to_string()).or_insert(Value::Null),
                Value::Array(items) => {
                    if items.len() <= *n {
                        items.resize(n + 1, Value::Null);
                    }
                    &mut items[*n]
                }
                _ => unreachable!("slot was just coerced to an array"),
            }
        }
        PathSegment::Key(key) => {
            if !matches!(slot, Value::Object(_)) {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                _ => unreachable!("slot was just coerced to an object"),
            }
        }
    }
}
