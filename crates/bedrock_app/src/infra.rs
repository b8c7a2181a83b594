use bedrock_domain::{CatalogInfra, CommandInfra, CompletionInfra, CredentialInfra, FileInfra};

/// Everything the application needs from the outside world.
pub trait Infrastructure:
    CredentialInfra + CatalogInfra + CompletionInfra + CommandInfra + FileInfra + 'static
{
}

impl<T> Infrastructure for T where
    T: CredentialInfra + CatalogInfra + CompletionInfra + CommandInfra + FileInfra + 'static
{
}
