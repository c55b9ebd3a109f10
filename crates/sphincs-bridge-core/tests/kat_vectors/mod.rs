mod sphincs_sha256_256f_robust;
