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

//! Helpers for rendering fragments inside a class scope from unit tests.

use kmp_model::{Artifact, ArtifactPool, ClassMetadata, Metadata, MetadataKind};

use crate::context::ContextFrame;
use crate::session::RenderSession;
use crate::visited::VisitedSet;

pub(crate) fn class_artifact(name: &str) -> Artifact {
    Artifact::new(name).with_metadata(Metadata::new(
        [1, 9, 0],
        MetadataKind::Class(ClassMetadata::new(name)),
    ))
}

/// Run `f` with a session positioned inside the (empty) class `name`, handing it a borrow
/// of `data` that lives as long as the session, and return what it wrote.
pub(crate) fn with_class_scope_over<T>(
    name: &str,
    data: T,
    f: impl for<'a> FnOnce(&mut RenderSession<'a>, &'a T),
) -> String {
    let mut pool = ArtifactPool::new();
    pool.insert(class_artifact(name))
        .expect("fresh pool accepts the scope class");
    let visited = VisitedSet::new();
    let artifact = pool.get(name).expect("scope class was just inserted");
    let metadata = artifact.metadata.as_ref().expect("scope class has metadata");

    let mut session = RenderSession::new(&pool, &visited);
    session.context.push(ContextFrame::new(artifact, metadata));
    session.out.push();
    f(&mut session, &data);
    let text = session.out.pop();
    session.context.pop();
    text
}

pub(crate) fn with_class_scope(name: &str, f: impl FnOnce(&mut RenderSession<'_>)) -> String {
    with_class_scope_over(name, (), |session, _| f(session))
}
